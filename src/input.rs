use std::{
    io::{self, Write},
    path::Path,
};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Where command lines come from: the terminal (with a prompt) or a batch
/// file (without one).
pub struct LineSource {
    reader: Box<dyn AsyncBufRead + Unpin + Send>,
    prompt: Option<String>,
}

impl LineSource {
    pub fn interactive(prompt: impl Into<String>) -> Self {
        Self {
            reader: Box::new(BufReader::new(tokio::io::stdin())),
            prompt: Some(prompt.into()),
        }
    }

    pub async fn batch(path: &Path) -> io::Result<Self> {
        let file = tokio::fs::File::open(path).await?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        Self {
            reader: Box::new(reader),
            prompt: None,
        }
    }

    /// Next line without its newline, or `None` at end of input. The bytes
    /// are returned as read, whatever their encoding.
    pub async fn next_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        if let Some(prompt) = &self.prompt {
            let mut stdout = io::stdout().lock();
            stdout.write_all(prompt.as_bytes())?;
            stdout.flush()?;
        }

        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(None);
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
        }

        Ok(Some(buf))
    }
}
