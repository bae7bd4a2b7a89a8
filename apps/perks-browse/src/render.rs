use std::fmt::Write;

use perks_controller::SearchView;
use perks_domain::{MerchantOption, Perk};

#[derive(Debug, Clone)]
pub struct RenderOptions {
	/// Label for [`MerchantOption::All`].
	pub all_label: String,
	pub json: bool,
}
impl Default for RenderOptions {
	fn default() -> Self {
		Self { all_label: perks_config::DEFAULT_ALL_MERCHANTS_LABEL.to_string(), json: false }
	}
}

pub fn render(view: &SearchView, options: &RenderOptions) -> color_eyre::Result<String> {
	if options.json {
		let mut line = serde_json::to_string(view)?;

		line.push('\n');

		return Ok(line);
	}

	Ok(render_text(view, &options.all_label))
}

pub fn render_text(view: &SearchView, all_label: &str) -> String {
	let mut out = String::new();
	let _ = write!(out, "{}", view.summary());

	if !view.query.trim().is_empty() {
		let _ = write!(out, " for \"{}\"", view.query.trim());
	}
	if view.loading {
		out.push_str(" (loading...)");
	}

	out.push('\n');
	out.push_str(&render_selector(view, all_label));
	out.push('\n');

	if let Some(error) = view.error.as_deref() {
		let _ = writeln!(out, "! {error} Type `retry` to try again.");
	}

	for perk in &view.perks {
		out.push_str(&render_perk(perk));
		out.push('\n');
	}

	out
}

fn render_selector(view: &SearchView, all_label: &str) -> String {
	let selected = view.selected_option();
	let labels: Vec<String> = view
		.filter_options
		.iter()
		.map(|option| {
			let label = match option {
				MerchantOption::All => all_label,
				MerchantOption::Merchant(name) => name.as_str(),
			};

			if selected == Some(option) { format!("[{label}]") } else { label.to_string() }
		})
		.collect();
	let mut line = format!("Merchant: {}", labels.join(" | "));

	if selected.is_none() {
		let _ = write!(line, " (filter \"{}\" not in results)", view.merchant_filter.trim());
	}

	line
}

fn render_perk(perk: &Perk) -> String {
	let mut parts = vec![perk.title.clone()];

	if let Some(merchant) = perk.merchant_name() {
		parts.push(merchant.to_string());
	}
	if let Some(discount) = perk.discount_percent {
		parts.push(format!("{discount}% off"));
	}
	if !perk.category.trim().is_empty() {
		parts.push(perk.category.clone());
	}

	format!("- {}", parts.join(" | "))
}

#[cfg(test)]
mod tests {
	use perks_controller::RequestPhase;
	use perks_domain::FilterOptions;

	use super::*;

	fn view(perks: Vec<Perk>) -> SearchView {
		SearchView {
			query: " latte ".to_string(),
			merchant_filter: String::new(),
			filter_options: FilterOptions::from_perks(&perks).selector(),
			perks,
			loading: false,
			error: None,
			phase: RequestPhase::Settled,
		}
	}

	#[test]
	fn renders_summary_selector_and_rows() {
		let perks = vec![
			Perk::new("1", "Half-price lattes")
				.with_merchant("Bean Co")
				.with_discount_percent(50.0)
				.with_category("food"),
			Perk::new("2", "Free refill"),
		];
		let text = render_text(&view(perks), "All merchants");

		assert_eq!(
			text,
			"\
Showing 2 perks for \"latte\"
Merchant: [All merchants] | Bean Co
- Half-price lattes | Bean Co | 50% off | food
- Free refill
"
		);
	}

	#[test]
	fn renders_loading_error_and_stale_selection() {
		let mut view = view(vec![Perk::new("1", "Gym pass").with_merchant("Fit")]);

		view.loading = true;
		view.error = Some("Failed to load perks.".to_string());
		view.merchant_filter = "Gone".to_string();

		let text = render_text(&view, "Any");

		assert!(text.starts_with("Showing 1 perk for \"latte\" (loading...)\n"));
		assert!(text.contains("Merchant: Any | Fit (filter \"Gone\" not in results)\n"));
		assert!(text.contains("! Failed to load perks. Type `retry` to try again.\n"));
	}

	#[test]
	fn json_mode_emits_one_line() {
		let options = RenderOptions { json: true, ..RenderOptions::default() };
		let line = render(&view(Vec::new()), &options).expect("Failed to render view.");
		let value: serde_json::Value =
			serde_json::from_str(line.trim_end()).expect("Rendered view must be JSON.");

		assert!(line.ends_with('\n'));
		assert_eq!(value["phase"], "settled");
		assert_eq!(value["filter_options"][0]["kind"], "all");
	}
}
