//! Interactive session: stdin lines go to the hub, broadcasts go to stdout.

use futures_util::{SinkExt, StreamExt};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::error::ClientError;

const QUIT_COMMAND: &str = "/quit";

/// Prefix `line` with the sender name, if one was given.
pub fn format_line(name: Option<&str>, line: &str) -> String {
    match name {
        Some(name) => format!("{name}: {line}"),
        None => line.to_string(),
    }
}

/// Render a received frame for the terminal. Control frames render as `None`.
pub fn render_message(message: &Message) -> Option<String> {
    match message {
        Message::Text(text) => Some(text.to_string()),
        Message::Binary(data) => Some(format!("<{} bytes of binary data>", data.len())),
        _ => None,
    }
}

/// Read lines on a dedicated thread; rustyline blocks.
///
/// The thread is detached so a blocked read never delays process exit.
fn spawn_line_reader() -> Result<mpsc::UnboundedReceiver<String>, ClientError> {
    let mut editor = DefaultEditor::new()?;
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        loop {
            match editor.readline("") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::warn!("Failed to read line: {}", e);
                    break;
                }
            }
        }
    });

    Ok(rx)
}

/// Connect to `url` and run an interactive session until quit or disconnect.
pub async fn run_client(url: &str, name: Option<&str>) -> Result<(), ClientError> {
    let (ws, _response) = connect_async(url).await?;
    tracing::info!("Connected to {}", url);
    println!("*** connected to {url} (type {QUIT_COMMAND} to leave)");

    let (mut sink, mut stream) = ws.split();
    let mut lines = spawn_line_reader()?;

    let mut printer = tokio::spawn(async move {
        while let Some(message) = stream.next().await {
            match message {
                Ok(message) => {
                    if let Some(text) = render_message(&message) {
                        println!("{text}");
                    }
                }
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                if line.trim() == QUIT_COMMAND {
                    break;
                }
                if line.trim().is_empty() {
                    continue;
                }
                sink.send(Message::Text(format_line(name, &line).into())).await?;
            }
            _ = &mut printer => {
                println!("*** connection closed by server");
                return Ok(());
            }
        }
    }

    println!("*** leaving");
    if let Err(e) = sink.close().await {
        tracing::debug!("Failed to close WebSocket cleanly: {}", e);
    }
    printer.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_with_name() {
        // テスト項目: 名前が指定されていれば行の先頭に付与される
        // when (操作):
        let result = format_line(Some("alice"), "hello");

        // then (期待する結果):
        assert_eq!(result, "alice: hello");
    }

    #[test]
    fn test_format_line_without_name() {
        // テスト項目: 名前がなければ行がそのまま送られる
        // then (期待する結果):
        assert_eq!(format_line(None, "hello"), "hello");
    }

    #[test]
    fn test_render_message() {
        // テスト項目: テキストとバイナリは表示され、制御フレームは表示されない
        // then (期待する結果):
        assert_eq!(
            render_message(&Message::Text("hi".into())),
            Some("hi".to_string())
        );
        assert_eq!(
            render_message(&Message::Binary(vec![1, 2, 3].into())),
            Some("<3 bytes of binary data>".to_string())
        );
        assert_eq!(render_message(&Message::Ping(Vec::new().into())), None);
    }

    #[tokio::test]
    async fn test_run_client_fails_without_server() {
        // テスト項目: サーバーに接続できなければ WebSocket エラーを返す
        // given (前提条件): 一度 bind して解放したポートには誰も listen していない
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        // when (操作):
        let result = run_client(&format!("ws://{addr}/ws"), None).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ClientError::WebSocket(_))));
    }
}
