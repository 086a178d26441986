//! Header-synonym resolution and value coercion.

use rollcall_core::import::NormalizedRow;

use crate::parse::RawRow;

// Accepted header spellings per canonical field, in priority order.
const EMAIL: &[&str] = &["email", "e-mail", "email address"];
const FIRST_NAME: &[&str] = &["firstname", "first name", "name"];
const LAST_NAME: &[&str] = &["lastname", "last name"];
const ENROLLED: &[&str] = &["enrolled", "is enrolled"];
const PHONE: &[&str] = &["phone", "mobile"];
const NOTES: &[&str] = &["notes", "note"];

/// Canonical form of a column header: trimmed and lower-cased.
fn normalize_key(key: &str) -> String {
  key.trim().to_lowercase()
}

/// Total boolean coercion: true iff the trimmed, lower-cased value is
/// one of `"true"`, `"1"`, `"yes"`, `"y"`. Everything else — including
/// empty — is false. Never fails.
pub fn to_boolean(value: &str) -> bool {
  matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "y")
}

/// First synonym that resolves to a non-empty value wins.
fn resolve<'a>(columns: &'a [(String, &'a str)], synonyms: &[&str]) -> &'a str {
  for syn in synonyms {
    for (key, value) in columns {
      if key.as_str() == *syn && !value.trim().is_empty() {
        return *value;
      }
    }
  }
  ""
}

/// Resolve a raw row to the canonical field set. Values are trimmed;
/// a row whose email stays empty is carried through and classified as
/// invalid by the import pipeline, not here.
pub fn normalize_row(row: &RawRow) -> NormalizedRow {
  let columns: Vec<(String, &str)> =
    row.iter().map(|(k, v)| (normalize_key(k), v)).collect();

  NormalizedRow {
    email: resolve(&columns, EMAIL).trim().to_string(),
    first_name: resolve(&columns, FIRST_NAME).trim().to_string(),
    last_name: resolve(&columns, LAST_NAME).trim().to_string(),
    enrolled: to_boolean(resolve(&columns, ENROLLED)),
    phone: resolve(&columns, PHONE).trim().to_string(),
    notes: resolve(&columns, NOTES).trim().to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn to_boolean_accepts_the_four_truthy_spellings() {
    for v in ["true", "TRUE", " 1 ", "Yes", "y", "Y "] {
      assert!(to_boolean(v), "{v:?} should coerce to true");
    }
  }

  #[test]
  fn to_boolean_is_false_for_everything_else() {
    for v in ["", "  ", "no", "0", "false", "enrolled", "ye", "11", "t"] {
      assert!(!to_boolean(v), "{v:?} should coerce to false");
    }
  }

  #[test]
  fn headers_match_case_and_whitespace_insensitively() {
    let row = RawRow::from_pairs([
      ("  E-MAIL ", "a@example.com"),
      ("First Name", "Ada"),
      ("LastName", "Lovelace"),
    ]);

    let n = normalize_row(&row);
    assert_eq!(n.email, "a@example.com");
    assert_eq!(n.first_name, "Ada");
    assert_eq!(n.last_name, "Lovelace");
  }

  #[test]
  fn earlier_synonym_wins_when_both_have_values() {
    let row = RawRow::from_pairs([
      ("Email", "primary@example.com"),
      ("Email Address", "other@example.com"),
    ]);
    assert_eq!(normalize_row(&row).email, "primary@example.com");
  }

  #[test]
  fn empty_valued_synonym_falls_through_to_the_next() {
    let row = RawRow::from_pairs([
      ("FirstName", "  "),
      ("Name", "Ada"),
    ]);
    assert_eq!(normalize_row(&row).first_name, "Ada");
  }

  #[test]
  fn missing_fields_default_to_empty_and_false() {
    let row = RawRow::from_pairs([("Email", "a@example.com")]);
    let n = normalize_row(&row);
    assert_eq!(n.first_name, "");
    assert_eq!(n.phone, "");
    assert_eq!(n.notes, "");
    assert!(!n.enrolled);
  }

  #[test]
  fn enrolled_coerces_from_synonym_column() {
    let row = RawRow::from_pairs([
      ("Email", "a@example.com"),
      ("Is Enrolled", "YES"),
    ]);
    assert!(normalize_row(&row).enrolled);
  }

  #[test]
  fn values_are_trimmed() {
    let row = RawRow::from_pairs([
      ("Email", "  a@example.com "),
      ("Notes", " call after 5pm  "),
    ]);
    let n = normalize_row(&row);
    assert_eq!(n.email, "a@example.com");
    assert_eq!(n.notes, "call after 5pm");
  }
}
