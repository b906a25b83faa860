use std::collections::BTreeMap;

use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convention::{CONVENTIONS, Convention, HCardField};
use crate::error::{HCardError, HCardResult};
use crate::html::Document;

/// Profile data an account exposes for discovery, as handed over by the
/// application. Every field is needed to publish an hCard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountData {
    pub guid: Option<String>,
    /// `user@host`; the hCard publishes the `user` part as nickname.
    pub diaspora_handle: Option<String>,
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub url: Option<String>,
    pub photo_large_url: Option<String>,
    pub photo_medium_url: Option<String>,
    pub photo_small_url: Option<String>,
    pub public_key: Option<String>,
    pub searchable: Option<bool>,
}

/// A profile discovery record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HCard {
    pub guid: String,
    pub nickname: String,
    pub full_name: String,
    pub first_name: String,
    pub last_name: String,
    /// Canonical profile URL.
    pub url: String,
    pub photo_large_url: String,
    pub photo_medium_url: String,
    pub photo_small_url: String,
    /// Absent on pages in the legacy layout.
    pub public_key: Option<String>,
    pub searchable: bool,
}

impl HCard {
    /// Builds a card from account data. Every field, public key included,
    /// must be present and non-blank. Values are trimmed, matching what
    /// [`HCard::from_html`] reads back.
    pub fn from_account(account: &AccountData) -> HCardResult<Self> {
        let handle = require(&account.diaspora_handle, "diaspora_handle")?;
        let nickname = match handle.split_once('@') {
            Some((local, host)) if !local.is_empty() && !host.is_empty() => local.to_string(),
            _ => {
                return Err(HCardError::InvalidData(format!(
                    "`{handle}` is not a user@host handle"
                )));
            }
        };

        Ok(Self {
            guid: require(&account.guid, "guid")?,
            nickname,
            full_name: require(&account.full_name, "full_name")?,
            first_name: require(&account.first_name, "first_name")?,
            last_name: require(&account.last_name, "last_name")?,
            url: require(&account.url, "url")?,
            photo_large_url: require(&account.photo_large_url, "photo_large_url")?,
            photo_medium_url: require(&account.photo_medium_url, "photo_medium_url")?,
            photo_small_url: require(&account.photo_small_url, "photo_small_url")?,
            public_key: Some(require(&account.public_key, "public_key")?),
            searchable: account
                .searchable
                .ok_or_else(|| missing_account_field("searchable"))?,
        })
    }

    /// Reads a card from a profile page in any known layout.
    pub fn from_html(html: &str) -> HCardResult<Self> {
        Self::from_html_with(html, CONVENTIONS)
    }

    /// Reads a card, consulting `conventions` in order for every field.
    ///
    /// The document must carry every field one of the conventions requires.
    pub fn from_html_with(html: &str, conventions: &[&Convention]) -> HCardResult<Self> {
        let document = Document::parse(html)?;

        let mut found = BTreeMap::new();
        for field in HCardField::ALL {
            for (rank, convention) in conventions.iter().enumerate() {
                if let Some(value) = convention.find(&document, field) {
                    if rank > 0 {
                        debug!(%field, convention = convention.name, "Field found via fallback layout");
                    }
                    found.insert(field, value);
                    break;
                }
            }
        }

        match conventions
            .iter()
            .map(|convention| convention.missing(&found))
            .min_by_key(Vec::len)
        {
            Some(missing) if missing.is_empty() => {}
            Some(missing) => {
                let names: Vec<&str> = missing.iter().map(|f| f.name()).collect();
                return Err(HCardError::InvalidData(format!(
                    "document lacks {}",
                    names.join(", ")
                )));
            }
            None => {
                return Err(HCardError::InvalidData(
                    "no layout conventions to read with".into(),
                ));
            }
        }

        let mut take = |field: HCardField| {
            found
                .remove(&field)
                .ok_or_else(|| HCardError::InvalidData(format!("document lacks {field}")))
        };

        let searchable = match take(HCardField::Searchable)?.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(HCardError::InvalidData(format!(
                    "searchable must be true or false, found `{other}`"
                )));
            }
        };

        Ok(Self {
            guid: take(HCardField::Guid)?,
            nickname: take(HCardField::Nickname)?,
            full_name: take(HCardField::FullName)?,
            first_name: take(HCardField::FirstName)?,
            last_name: take(HCardField::LastName)?,
            url: take(HCardField::Url)?,
            photo_large_url: take(HCardField::PhotoLarge)?,
            photo_medium_url: take(HCardField::PhotoMedium)?,
            photo_small_url: take(HCardField::PhotoSmall)?,
            public_key: take(HCardField::PublicKey).ok(),
            searchable,
        })
    }

    /// Renders the card as a profile page in the current layout.
    ///
    /// Output is deterministic: the same card always yields the same bytes.
    pub fn to_html(&self) -> String {
        let name = escape(self.full_name.as_str());
        let url = escape(self.url.as_str());

        let mut entries = String::new();
        entry(&mut entries, "uid", "Uid", &span("uid", &self.guid));
        entry(&mut entries, "nickname", "Nickname", &span("nickname", &self.nickname));
        entry(&mut entries, "full_name", "Full_name", &span("fn", &self.full_name));
        let searchable = if self.searchable { "true" } else { "false" };
        entry(&mut entries, "searchable", "Searchable", &span("searchable", searchable));
        if let Some(key) = &self.public_key {
            entry(&mut entries, "key", "Key", &span("key", key));
        }
        entry(&mut entries, "first_name", "First_name", &span("given_name", &self.first_name));
        entry(&mut entries, "family_name", "Family_name", &span("family_name", &self.last_name));
        entry(
            &mut entries,
            "url",
            "Url",
            &format!(r#"<a id="pod_location" class="url" rel="me" href="{url}">{url}</a>"#),
        );
        entry(&mut entries, "photo", "Photo", &photo(&self.photo_large_url, 300));
        entry(&mut entries, "photo_medium", "Photo_medium", &photo(&self.photo_medium_url, 100));
        entry(&mut entries, "photo_small", "Photo_small", &photo(&self.photo_small_url, 50));

        format!(
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.0 Transitional//EN" "http://www.w3.org/TR/REC-html40/loose.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
  <head>
    <meta http-equiv="Content-Type" content="text/html; charset=UTF-8" />
    <meta charset="UTF-8" />
    <title>{name}</title>
  </head>
  <body>
    <div id="content">
      <h1>{name}</h1>
      <div id="content_inner" class="entity_profile vcard author">
        <h2>User profile</h2>
{entries}      </div>
    </div>
  </body>
</html>
"#
        )
    }
}

fn missing_account_field(field: &str) -> HCardError {
    HCardError::InvalidData(format!("account data lacks {field}"))
}

fn require(value: &Option<String>, field: &str) -> HCardResult<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| missing_account_field(field))
}

fn span(class: &str, value: &str) -> String {
    format!(r#"<span class="{class}">{}</span>"#, escape(value))
}

fn photo(src: &str, size: u32) -> String {
    format!(
        r#"<img class="photo avatar" width="{size}px" height="{size}px" src="{}" />"#,
        escape(src)
    )
}

fn entry(out: &mut String, entity: &str, title: &str, value: &str) {
    out.push_str(&format!(
        r#"        <dl class="entity_{entity}">
          <dt>{title}</dt>
          <dd>
            {value}
          </dd>
        </dl>
"#
    ));
}
