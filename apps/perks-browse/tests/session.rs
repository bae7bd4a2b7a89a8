use std::time::Duration;

use tokio::{
	io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines},
	time,
};

use perks_browse::{render::RenderOptions, session};
use perks_controller::SearchController;
use perks_testkit::{ScriptedGateway, perk};

async fn read_until(lines: &mut Lines<BufReader<DuplexStream>>, needle: &str) -> Vec<String> {
	let mut seen = Vec::new();

	loop {
		let line = time::timeout(Duration::from_secs(10), lines.next_line())
			.await
			.expect("Timed out reading session output.")
			.expect("Failed to read session output.")
			.expect("Session output ended early.");
		let done = line.contains(needle);

		seen.push(line);

		if done {
			return seen;
		}
	}
}

#[tokio::test]
async fn session_drives_controller_and_renders_results() {
	let (gateway, mut fetches) = ScriptedGateway::new();
	let handle = perks_controller::spawn(SearchController::default(), gateway.clone());
	let (mut input, input_rx) = tokio::io::duplex(1_024);
	let (output_tx, output_rx) = tokio::io::duplex(64 * 1_024);
	let mut output = BufReader::new(output_rx).lines();
	let session = tokio::spawn(async move {
		session::drive(handle, BufReader::new(input_rx), output_tx, &RenderOptions::default())
			.await
	});

	let mount = fetches.next().await.expect("Mount fetch must be issued.");

	assert!(mount.query.is_unfiltered());

	mount.succeed(vec![perk("1", Some("Bean Co")), perk("2", Some("Acme"))]);

	let rendered = read_until(&mut output, "Showing 2 perks").await;

	assert!(rendered.iter().any(|line| line.contains("Showing 2 perks")));

	read_until(&mut output, "Merchant: [All merchants] | Acme | Bean Co").await;

	input.write_all(b"merchant Acme\ngo\n").await.expect("Failed to write input.");

	let fetch = fetches.next().await.expect("Immediate fetch must be issued.");

	assert_eq!(fetch.query.merchant.as_deref(), Some("Acme"));

	fetch.fail_with_message(503, "Perk index is warming up.");

	read_until(&mut output, "! Perk index is warming up. Type `retry` to try again.").await;

	input.write_all(b"bogus\nquit\n").await.expect("Failed to write input.");

	read_until(&mut output, "Unknown command `bogus`").await;

	time::timeout(Duration::from_secs(10), session)
		.await
		.expect("Session must finish after quit.")
		.expect("Session task panicked.")
		.expect("Session must end cleanly.");
}
