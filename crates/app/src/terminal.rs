//! Line-oriented terminal front-end.
//!
//! Reads one command per line, dispatches it through [`AppState`] and redraws
//! the active screen whenever the state revision changes. Redraws also happen
//! while the user is idle, e.g. when a settle timer advances the swipe card.

use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::command::{Command, CommandError};
use crate::error::{AppError, Result};
use crate::state::{AppState, Dispatch, Reply};

const SEPARATOR: &str = "----------------------------------------";

/// Run the terminal loop until `quit`, end of input or `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails. Command and
/// render failures are reported on screen and the loop continues.
pub async fn run<R, W>(
    state: AppState,
    mut input: R,
    mut output: W,
    shutdown: impl Future<Output = ()>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();
    let mut revisions = state.subscribe();
    tokio::pin!(shutdown);

    write_text(&mut output, "Type 'help' for the commands on each screen.").await?;
    revisions.borrow_and_update();
    draw(&state, &mut output).await?;

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
            changed = revisions.changed() => {
                if changed.is_err() {
                    break;
                }
                revisions.borrow_and_update();
                draw(&state, &mut output).await?;
            }
            // A cancelled read leaves its partial line in `line`.
            read = input.read_until(b'\n', &mut line) => {
                if read? == 0 && line.is_empty() {
                    debug!("End of input");
                    break;
                }
                let keep_going = match decode_line(std::mem::take(&mut line)) {
                    Ok(text) => dispatch(&state, &text, &mut output).await?,
                    Err(e) => {
                        report(&mut output, &AppError::from(e)).await?;
                        true
                    }
                };
                if !keep_going {
                    break;
                }
            }
        }
    }

    output.flush().await?;
    Ok(())
}

/// Strip the line terminator and decode. Invalid UTF-8 rejects the line only.
fn decode_line(mut bytes: Vec<u8>) -> std::result::Result<String, CommandError> {
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }
    String::from_utf8(bytes).map_err(|_| CommandError::InvalidEncoding)
}

/// Handle one input line. Returns `false` when the session should end.
async fn dispatch<W>(state: &AppState, line: &str, output: &mut W) -> Result<bool>
where
    W: AsyncWrite + Unpin,
{
    let command = match Command::parse(line) {
        Ok(command) => command,
        Err(CommandError::Empty) => return Ok(true),
        Err(e) => {
            report(output, &AppError::from(e)).await?;
            return Ok(true);
        }
    };

    match state.handle(command).await {
        Ok(Dispatch {
            reply: Reply::Quit, ..
        }) => Ok(false),
        Ok(Dispatch {
            reply: Reply::Message(text),
            ..
        }) => {
            write_text(output, &text).await?;
            Ok(true)
        }
        // The revision bump triggers the redraw.
        Ok(Dispatch {
            reply: Reply::Redraw,
            ..
        }) => Ok(true),
        Err(e) => {
            report(output, &e).await?;
            Ok(true)
        }
    }
}

async fn draw<W>(state: &AppState, output: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    match state.render().await {
        Ok(screen) => {
            write_text(output, SEPARATOR).await?;
            write_text(output, screen.trim_end()).await
        }
        Err(e) => report(output, &e).await,
    }
}

async fn report<W>(output: &mut W, error: &AppError) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    error.report();
    write_text(output, &format!("! {error}")).await
}

async fn write_text<W>(output: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
