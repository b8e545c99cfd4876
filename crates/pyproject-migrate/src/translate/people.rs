//! Authors and maintainers.
//!
//! setuptools keeps names and emails in two parallel comma-separated fields.
//! Entries pair up by position; either side may also use the
//! `Name <email>` form.

use itertools::{EitherOrBoth, Itertools};

use crate::legacy::LegacyValue;
use crate::manifest::Contributor;
use crate::translate::canonical;

/// Pair up name and email entries into contributors, dropping entries with
/// neither part.
pub(crate) fn contributors(
    names: Option<&LegacyValue>,
    emails: Option<&LegacyValue>,
) -> Vec<Contributor> {
    let names = names.map(entries).unwrap_or_default();
    let emails = emails.map(entries).unwrap_or_default();

    names
        .iter()
        .zip_longest(emails.iter())
        .filter_map(|pair| {
            let (name, email) = match pair {
                EitherOrBoth::Both(name, email) => (
                    split_address(name, Side::Name),
                    split_address(email, Side::Email),
                ),
                EitherOrBoth::Left(name) => (split_address(name, Side::Name), Address::default()),
                EitherOrBoth::Right(email) => {
                    (Address::default(), split_address(email, Side::Email))
                }
            };
            Contributor::new(
                name.name.or(email.name),
                email.email.or(name.email),
            )
        })
        .collect()
}

/// Split a field into positional entries. Empty entries are kept so that
/// names and emails stay aligned.
fn entries(value: &LegacyValue) -> Vec<String> {
    match value {
        LegacyValue::Text(text) => text.split(',').map(ToOwned::to_owned).collect(),
        LegacyValue::List(items) => items.clone(),
        LegacyValue::File(_) | LegacyValue::Table(_) => Vec::new(),
    }
}

#[derive(Copy, Clone)]
enum Side {
    Name,
    Email,
}

#[derive(Default)]
struct Address<'a> {
    name: Option<&'a str>,
    email: Option<&'a str>,
}

/// Parse `Name <email>`; a bare entry is a name or an email depending on
/// which field it came from.
fn split_address(entry: &str, side: Side) -> Address<'_> {
    let Some(entry) = canonical(entry) else {
        return Address::default();
    };
    if let Some((name, email)) = entry
        .strip_suffix('>')
        .and_then(|rest| rest.rsplit_once('<'))
    {
        return Address {
            name: canonical(name),
            email: canonical(email),
        };
    }
    match side {
        Side::Name => Address {
            name: Some(entry),
            email: None,
        },
        Side::Email => Address {
            name: None,
            email: Some(entry),
        },
    }
}
