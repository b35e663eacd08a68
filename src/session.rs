use crate::agent::Conversation;
use anyhow::Result;
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

const PROMPT: &str = "> ";

/// Drive a conversation over line-based input until EOF, `quit`/`exit` or `shutdown`.
///
/// `shutdown` is raced against both reading a line and answering it, so a
/// long-running search is abandoned as soon as it resolves.
pub async fn run_session<R, W, S>(
    conversation: &mut Conversation<'_>,
    input: R,
    mut output: W,
    shutdown: S,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut lines = input.lines();

    output
        .write_all(format!("{}\n\n{}", Conversation::greeting(), PROMPT).as_bytes())
        .await?;
    output.flush().await?;

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut shutdown => {
                info!("Interrupted while waiting for input");
                None
            }
        };
        let Some(line) = line else {
            break;
        };

        let query = line.trim();
        if query.is_empty() {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;
            continue;
        }
        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
            break;
        }

        let reply = tokio::select! {
            reply = conversation.respond(query) => reply,
            _ = &mut shutdown => {
                info!("Interrupted during search");
                break;
            }
        };
        output
            .write_all(format!("{}\n\n{}", reply.trim_end(), PROMPT).as_bytes())
            .await?;
        output.flush().await?;
    }

    Ok(())
}
