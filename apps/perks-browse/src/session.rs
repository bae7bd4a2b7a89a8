use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use perks_controller::SearchHandle;

use crate::{
	command::{HELP, ReplCommand},
	render::{self, RenderOptions},
};

/// Runs an interactive session: issues the mount fetch, then applies commands read from
/// `input` and re-renders to `output` whenever the view changes. Returns after `quit`, end of
/// input, or the controller stopping.
pub async fn drive<R, W>(
	handle: SearchHandle,
	input: R,
	mut output: W,
	options: &RenderOptions,
) -> color_eyre::Result<()>
where
	R: AsyncBufRead + Unpin,
	W: AsyncWrite + Unpin,
{
	let mut views = handle.subscribe();
	let mut lines = input.lines();

	handle.initialize()?;

	loop {
		tokio::select! {
			line = lines.next_line() => {
				let Some(line) = line? else {
					break;
				};

				match ReplCommand::parse(&line) {
					None => continue,
					Some(ReplCommand::Quit) => break,
					Some(ReplCommand::Help) => output.write_all(HELP.as_bytes()).await?,
					Some(ReplCommand::Show) => {
						let view = views.borrow().clone();

						output.write_all(render::render(&view, options)?.as_bytes()).await?;
					},
					Some(ReplCommand::Unknown(word)) => {
						let message = format!("Unknown command `{word}`. Type `help` for commands.\n");

						output.write_all(message.as_bytes()).await?;
					},
					Some(ReplCommand::Intent(intent)) => handle.send(intent)?,
				}
			},
			changed = views.changed() => {
				if changed.is_err() {
					tracing::warn!("Search controller stopped unexpectedly.");

					break;
				}

				let view = views.borrow_and_update().clone();

				output.write_all(render::render(&view, options)?.as_bytes()).await?;
			},
		}

		output.flush().await?;
	}

	output.flush().await?;
	handle.shutdown().await?;

	Ok(())
}
