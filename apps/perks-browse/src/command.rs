use perks_controller::Intent;

pub const HELP: &str = "\
Commands:
  search <text>    set the search text (alias: / <text>)
  merchant [name]  filter by merchant; no name clears the filter (alias: all)
  go               search now without waiting
  reset            clear search text and merchant filter
  retry            repeat the last search
  show             print the current results again
  help             show this help
  quit             exit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
	Intent(Intent),
	Show,
	Help,
	Quit,
	Unknown(String),
}
impl ReplCommand {
	/// Parses one input line. Blank lines yield `None`.
	pub fn parse(line: &str) -> Option<Self> {
		let line = line.trim_start();

		if line.trim().is_empty() {
			return None;
		}

		if let Some(text) = line.strip_prefix('/') {
			return Some(Self::Intent(Intent::SetQuery(argument(text))));
		}

		let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
		let command = match word.to_ascii_lowercase().as_str() {
			"search" | "s" => Self::Intent(Intent::SetQuery(argument(rest))),
			"merchant" | "m" => Self::Intent(Intent::SetMerchantFilter(rest.trim().to_string())),
			"all" => Self::Intent(Intent::SetMerchantFilter(String::new())),
			"go" => Self::Intent(Intent::SubmitNow),
			"reset" => Self::Intent(Intent::Reset),
			"retry" => Self::Intent(Intent::Refetch),
			"show" => Self::Show,
			"help" | "?" => Self::Help,
			"quit" | "exit" | "q" => Self::Quit,
			_ => Self::Unknown(word.to_string()),
		};

		Some(command)
	}
}

// Search text is passed through as typed so the controller sees every edit; trimming happens
// when the request is built.
fn argument(raw: &str) -> String {
	raw.strip_prefix(' ').unwrap_or(raw).trim_end_matches(['\r', '\n']).to_string()
}
