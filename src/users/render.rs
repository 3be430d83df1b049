use crate::users::{UserCollection, UserId};
use std::fmt::{self, Write as _};

pub const HEADING: &str = "Users";
pub const FALLBACK: &str = "No users found";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListItem {
    pub key: Option<UserId>,
    pub text: String,
}

/// Output of one render of the user list: a heading and the list items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub heading: &'static str,
    pub items: Vec<ListItem>,
}

impl Rendered {
    /// One keyed item per user, in collection order.
    #[must_use]
    pub fn list(users: &UserCollection) -> Self {
        let items = users
            .iter()
            .map(|user| ListItem {
                key: Some(user.id.clone()),
                text: user.display_name(),
            })
            .collect();

        Self {
            heading: HEADING,
            items,
        }
    }

    #[must_use]
    pub fn fallback() -> Self {
        Self {
            heading: HEADING,
            items: vec![ListItem {
                key: None,
                text: FALLBACK.to_string(),
            }],
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self.items.as_slice(), [ListItem { key: None, text }] if text == FALLBACK)
    }

    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<div><h1>");
        html.push_str(&escape(self.heading));
        html.push_str("</h1><ul>");

        for item in &self.items {
            match &item.key {
                Some(key) => {
                    let _ = write!(html, "<li data-key=\"{}\">", escape(&key.to_string()));
                }
                None => html.push_str("<li>"),
            }
            html.push_str(&escape(&item.text));
            html.push_str("</li>");
        }

        html.push_str("</ul></div>");
        html
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "{}", self.heading)?;
        for item in &self.items {
            writeln!(formatter, "- {}", item.text)?;
        }
        Ok(())
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
