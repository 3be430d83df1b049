use crate::users::FetchError;
use serde::{Deserialize, Deserializer};
use std::{collections::BTreeMap, fmt};

/// Identifier of a user, used as the list-rendering key. The server emits
/// numeric ids but string ids are accepted as-is.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(id) => write!(formatter, "{id}"),
            UserId::Text(id) => formatter.write_str(id),
        }
    }
}

/// Absent or `null` text decodes as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_name: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// First and last name joined with no separator.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}{}", self.first_name, self.last_name)
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub href: String,
}

/// A HAL relation maps to either one link or an array of them.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum LinkSet {
    One(Link),
    Many(Vec<Link>),
}

impl LinkSet {
    #[must_use]
    pub fn first(&self) -> Option<&Link> {
        match self {
            LinkSet::One(link) => Some(link),
            LinkSet::Many(links) => links.first(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Embedded {
    #[serde(rename = "userModelList", default)]
    pub user_model_list: Option<Vec<User>>,
}

/// Response body of `GET /users`:
/// `{ "_embedded": { "userModelList": [...] }, "_links": { "self": { "href": ... } } }`
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UsersEnvelope {
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Embedded>,
    #[serde(rename = "_links", default)]
    pub links: Option<BTreeMap<String, LinkSet>>,
}

impl UsersEnvelope {
    #[must_use]
    pub fn self_href(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|links| links.get("self"))
            .and_then(LinkSet::first)
            .map(|link| link.href.as_str())
    }
}

/// Ordered users unwrapped from a [`UsersEnvelope`]. Order is the response order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserCollection {
    users: Vec<User>,
}

impl UserCollection {
    #[must_use]
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// # Errors
    /// Returns [`FetchError::ShapeMismatch`] if `_embedded` or `userModelList` is absent.
    pub fn from_envelope(envelope: UsersEnvelope) -> Result<Self, FetchError> {
        let embedded = envelope
            .embedded
            .ok_or_else(|| FetchError::ShapeMismatch("no _embedded found".to_string()))?;

        let users = embedded.user_model_list.ok_or_else(|| {
            FetchError::ShapeMismatch("no _embedded.userModelList found".to_string())
        })?;

        Ok(Self { users })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, User> {
        self.users.iter()
    }
}

impl<'a> IntoIterator for &'a UserCollection {
    type Item = &'a User;
    type IntoIter = std::slice::Iter<'a, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.users.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> Result<UsersEnvelope> {
        Ok(serde_json::from_value(value)?)
    }

    #[test]
    fn decodes_spring_hal_payload() -> Result<()> {
        let envelope = decode(json!({
            "_embedded": {
                "userModelList": [
                    {
                        "id": 1,
                        "username": "ada",
                        "email": "ada@example.com",
                        "firstName": "Ada",
                        "lastName": "Lovelace",
                        "accounts": [],
                        "_links": {
                            "self": {"href": "http://localhost:7171/users/1"},
                            "users": {"href": "http://localhost:7171/users"}
                        }
                    }
                ]
            },
            "_links": {"self": {"href": "http://localhost:7171/users"}}
        }))?;

        assert_eq!(envelope.self_href(), Some("http://localhost:7171/users"));

        let users = UserCollection::from_envelope(envelope)?;
        assert_eq!(users.len(), 1);

        let ada = users.iter().next().ok_or_else(|| anyhow::anyhow!("no user"))?;
        assert_eq!(ada.id, UserId::Number(1));
        assert_eq!(ada.display_name(), "AdaLovelace");
        assert_eq!(ada.username.as_deref(), Some("ada"));
        Ok(())
    }

    #[test]
    fn string_ids_are_kept_verbatim() -> Result<()> {
        let envelope = decode(json!({
            "_embedded": {"userModelList": [{"id": "u-7", "firstName": "Grace", "lastName": "Hopper"}]}
        }))?;
        let users = UserCollection::from_envelope(envelope)?;
        let ids: Vec<String> = users.iter().map(|u| u.id.to_string()).collect();
        assert_eq!(ids, vec!["u-7"]);
        Ok(())
    }

    #[test]
    fn missing_names_decode_as_empty() -> Result<()> {
        let envelope = decode(json!({"_embedded": {"userModelList": [{"id": 3}]}}))?;
        let users = UserCollection::from_envelope(envelope)?;
        assert_eq!(
            users.iter().map(User::display_name).collect::<Vec<_>>(),
            vec![String::new()]
        );
        Ok(())
    }

    #[test]
    fn null_names_decode_as_empty() -> Result<()> {
        let envelope = decode(json!({"_embedded": {"userModelList": [
            {"id": 1, "firstName": null, "lastName": "Babbage", "email": null},
            {"id": 2, "firstName": "Ada", "lastName": "Lovelace"}
        ]}}))?;
        let users = UserCollection::from_envelope(envelope)?;
        assert_eq!(
            users.iter().map(User::display_name).collect::<Vec<_>>(),
            vec!["Babbage".to_string(), "AdaLovelace".to_string()]
        );
        Ok(())
    }

    #[test]
    fn missing_embedded_is_shape_mismatch() -> Result<()> {
        let err = UserCollection::from_envelope(decode(json!({}))?)
            .err()
            .ok_or_else(|| anyhow::anyhow!("expected error"))?;
        assert!(matches!(err, FetchError::ShapeMismatch(_)));
        Ok(())
    }

    #[test]
    fn missing_user_model_list_is_shape_mismatch() -> Result<()> {
        let err = UserCollection::from_envelope(decode(json!({"_embedded": {}}))?)
            .err()
            .ok_or_else(|| anyhow::anyhow!("expected error"))?;
        assert!(err.to_string().contains("userModelList"));
        Ok(())
    }

    #[test]
    fn empty_list_is_a_collection() -> Result<()> {
        let users =
            UserCollection::from_envelope(decode(json!({"_embedded": {"userModelList": []}}))?)?;
        assert!(users.is_empty());
        Ok(())
    }

    #[test]
    fn malformed_embedded_fails_to_decode() {
        assert!(decode(json!({"_embedded": "nope"})).is_err());
        assert!(decode(json!({"_embedded": {"userModelList": {"id": 1}}})).is_err());
    }

    #[test]
    fn links_accept_arrays() -> Result<()> {
        let envelope = decode(json!({
            "_links": {"self": [{"href": "http://a/users"}, {"href": "http://b/users"}]}
        }))?;
        assert_eq!(envelope.self_href(), Some("http://a/users"));
        Ok(())
    }
}
