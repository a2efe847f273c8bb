/// A mail message split into its header block and body.
///
/// Only what announcement parsing needs: header unfolding and
/// case-insensitive lookup. MIME structure is not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    headers: Vec<(String, String)>,
    body: String,
}

impl MailMessage {
    pub fn parse(text: &str) -> Self {
        let text = text.replace("\r\n", "\n");
        let text = text.trim_start_matches('\n');

        let mut headers: Vec<(String, String)> = Vec::new();
        let mut rest = text;

        loop {
            let (line, remainder) = match rest.split_once('\n') {
                Some((line, remainder)) => (line, remainder),
                None => (rest, ""),
            };

            if line.is_empty() {
                rest = remainder;
                break;
            }

            if line.starts_with([' ', '\t']) {
                match headers.last_mut() {
                    Some((_, value)) => {
                        value.push(' ');
                        value.push_str(line.trim());
                    }
                    None => break,
                }
            } else if let Some((name, value)) = split_header(line) {
                headers.push((name.to_string(), value.trim().to_string()));
            } else {
                break;
            }

            rest = remainder;
            if rest.is_empty() {
                break;
            }
        }

        Self {
            headers,
            body: rest.to_string(),
        }
    }

    /// First value of the named header; names compare case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn subject(&self) -> Option<&str> {
        self.header("Subject")
    }

    pub fn date(&self) -> Option<&str> {
        self.header("Date")
    }

    pub fn is_multipart(&self) -> bool {
        self.header("Content-Type")
            .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("multipart/"))
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

fn split_header(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    let valid_name = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_graphic() && b != b':');
    valid_name.then_some((name, value))
}
