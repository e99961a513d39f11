//! JSON document input from a file or stdin.

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tokio::io::AsyncReadExt;

/// Where a JSON document is read from: a file path, or `-` for stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl FromStr for Input {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "-" => Self::Stdin,
            path => Self::File(PathBuf::from(path)),
        })
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("-"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Input {
    /// Reads the whole document as text.
    async fn read_to_string(&self) -> anyhow::Result<String> {
        match self {
            Self::Stdin => {
                let mut buf = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buf)
                    .await
                    .context("failed to read stdin")?;
                Ok(buf)
            }
            Self::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read '{}'", path.display())),
        }
    }

    /// Reads and decodes the document.
    pub async fn read_json<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        let text = self.read_to_string().await?;
        parse_json(&text).with_context(|| format!("invalid JSON in '{self}'"))
    }
}

fn parse_json<T: DeserializeOwned>(text: &str) -> anyhow::Result<T> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use labdesk_flow::FlowGraph;
    use serde_json::Value;

    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!("-".parse::<Input>().unwrap(), Input::Stdin);
        assert_eq!(
            "flows/main.json".parse::<Input>().unwrap(),
            Input::File(PathBuf::from("flows/main.json"))
        );
        assert_eq!(Input::Stdin.to_string(), "-");
    }

    #[test]
    fn test_parse_json_flow() {
        let flow: FlowGraph = parse_json(
            r#"{"name": "F", "nodes": [{"id": "a", "type": "t1"}], "edges": []}"#,
        )
        .unwrap();
        assert_eq!(flow.name, "F");
        assert!(flow.contains("a"));
    }

    #[test]
    fn test_parse_json_rejects_garbage() {
        assert!(parse_json::<Value>("{not json").is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let input = Input::File(PathBuf::from("/nonexistent/labdesk/flow.json"));
        let error = input.read_json::<Value>().await.unwrap_err();
        assert!(format!("{error:#}").contains("/nonexistent/labdesk/flow.json"));
    }
}
