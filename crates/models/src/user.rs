use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::{errors::ModelError, supplied};

pub const MSG_USERNAME: &str = "Username must be at least 3 characters long.";
pub const MSG_PASSWORD: &str = "Password must be at least 5 characters long.";
pub const MSG_FULL_NAME: &str = "Full name must be at least 10 characters long if provided.";
pub const MSG_AGE: &str = "Age must be at least 10.";
pub const MSG_EMAIL: &str = "Invalid email address.";
pub const MSG_GENDER: &str = "Gender must be either 'male' or 'female'.";
pub const MSG_USERNAME_TAKEN: &str = "Username already exists.";

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 5;
pub const MIN_FULL_NAME_LEN: usize = 10;
pub const MIN_AGE: f64 = 10.0;

/// A registered account, keyed by `username`.
///
/// The password is stored as supplied, without hashing. `age` keeps the
/// number exactly as it was sent, so `19` is written back as `19` and
/// `12.5` as `12.5`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Number>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

/// What the API echoes back after registration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Number>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl From<&UserAccount> for UserProfile {
    fn from(u: &UserAccount) -> Self {
        Self {
            username: u.username.clone(),
            full_name: u.full_name.clone(),
            age: u.age.clone(),
            email: u.email.clone(),
            gender: u.gender.clone(),
        }
    }
}

/// Registration input as parsed from the request body.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUserAccount {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub age: Option<Number>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

pub fn validate_username(username: Option<&str>) -> Result<&str, ModelError> {
    match username {
        Some(u) if u.chars().count() >= MIN_USERNAME_LEN => Ok(u),
        _ => Err(ModelError::validation(MSG_USERNAME)),
    }
}

pub fn validate_password(password: Option<&str>) -> Result<&str, ModelError> {
    match password {
        Some(p) if p.chars().count() >= MIN_PASSWORD_LEN => Ok(p),
        _ => Err(ModelError::validation(MSG_PASSWORD)),
    }
}

pub fn validate_full_name(full_name: Option<&str>) -> Result<(), ModelError> {
    match full_name {
        Some(n) if n.chars().count() < MIN_FULL_NAME_LEN => Err(ModelError::validation(MSG_FULL_NAME)),
        _ => Ok(()),
    }
}

/// Any JSON number is accepted as an age, fractional ones included. Only a
/// supplied age below the minimum is rejected; an absent age passes.
pub fn validate_age(age: Option<&Number>) -> Result<(), ModelError> {
    match age.and_then(Number::as_f64) {
        Some(a) if a < MIN_AGE => Err(ModelError::validation(MSG_AGE)),
        _ => Ok(()),
    }
}

pub fn validate_email(email: Option<&str>) -> Result<&str, ModelError> {
    match email {
        Some(e) if e.contains('@') => Ok(e),
        _ => Err(ModelError::validation(MSG_EMAIL)),
    }
}

pub fn validate_gender(gender: Option<&str>) -> Result<(), ModelError> {
    match gender {
        Some(g) if !matches!(g.to_lowercase().as_str(), "male" | "female") => {
            Err(ModelError::validation(MSG_GENDER))
        }
        _ => Ok(()),
    }
}

impl NewUserAccount {
    /// Checks run in a fixed order and stop at the first failure:
    /// username, password, full name, age, email, gender.
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_username(supplied(&self.username))?;
        validate_password(supplied(&self.password))?;
        validate_full_name(supplied(&self.full_name))?;
        validate_age(self.age.as_ref())?;
        validate_email(supplied(&self.email))?;
        validate_gender(supplied(&self.gender))?;
        Ok(())
    }

    pub fn into_account(self) -> Result<UserAccount, ModelError> {
        self.validate()?;
        let username = validate_username(supplied(&self.username))?.to_string();
        let password = validate_password(supplied(&self.password))?.to_string();
        let email = validate_email(supplied(&self.email))?.to_string();
        Ok(UserAccount {
            username,
            password,
            full_name: self.full_name,
            age: self.age,
            email,
            gender: self.gender,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> NewUserAccount {
        NewUserAccount {
            username: Some("abc".into()),
            password: Some("secret".into()),
            full_name: None,
            age: Some(Number::from(21)),
            email: Some("abc@example.com".into()),
            gender: None,
        }
    }

    fn err(input: NewUserAccount) -> String {
        match input.validate() {
            Err(ModelError::Validation(msg)) => msg,
            Ok(()) => panic!("expected validation failure"),
        }
    }

    #[test]
    fn minimal_account_is_valid() {
        let acc = valid().into_account().unwrap();
        assert_eq!(acc.username, "abc");
        assert_eq!(acc.age, Some(Number::from(21)));
        assert!(acc.full_name.is_none());
    }

    #[test]
    fn username_too_short() {
        assert_eq!(err(NewUserAccount { username: Some("ab".into()), ..valid() }), MSG_USERNAME);
        assert_eq!(err(NewUserAccount { username: None, ..valid() }), MSG_USERNAME);
    }

    #[test]
    fn checks_run_in_fixed_order() {
        // Everything wrong: the username message wins.
        let all_bad = NewUserAccount {
            username: Some("a".into()),
            password: Some("p".into()),
            full_name: Some("short".into()),
            age: Some(Number::from(3)),
            email: Some("nope".into()),
            gender: Some("other".into()),
        };
        assert_eq!(err(all_bad.clone()), MSG_USERNAME);
        let next = NewUserAccount { username: Some("abc".into()), ..all_bad };
        assert_eq!(err(next.clone()), MSG_PASSWORD);
        let next = NewUserAccount { password: Some("secret".into()), ..next };
        assert_eq!(err(next.clone()), MSG_FULL_NAME);
        let next = NewUserAccount { full_name: Some("Alexander Smith".into()), ..next };
        assert_eq!(err(next.clone()), MSG_AGE);
        let next = NewUserAccount { age: Some(Number::from(10)), ..next };
        assert_eq!(err(next.clone()), MSG_EMAIL);
        let next = NewUserAccount { email: Some("a@b".into()), ..next };
        assert_eq!(err(next.clone()), MSG_GENDER);
        let next = NewUserAccount { gender: Some("FeMale".into()), ..next };
        assert!(next.validate().is_ok());
    }

    #[test]
    fn missing_age_is_accepted_and_omitted() {
        let acc = NewUserAccount { age: None, ..valid() }.into_account().unwrap();
        assert!(acc.age.is_none());
        let value = serde_json::to_value(&acc).unwrap();
        assert!(value.get("age").is_none());
    }

    #[test]
    fn fractional_ages_compare_against_the_minimum() {
        let input: NewUserAccount = serde_json::from_str(
            r#"{"username":"abc","password":"12345","age":12.5,"email":"a@b"}"#,
        )
        .unwrap();
        let acc = input.into_account().unwrap();
        assert_eq!(serde_json::to_value(&acc).unwrap()["age"], serde_json::json!(12.5));

        let low = NewUserAccount { age: Number::from_f64(9.99), ..valid() };
        assert_eq!(err(low), MSG_AGE);
        let negative = NewUserAccount { age: Some(Number::from(-4)), ..valid() };
        assert_eq!(err(negative), MSG_AGE);
    }

    #[test]
    fn integer_age_is_written_back_as_integer() {
        let acc = valid().into_account().unwrap();
        let raw = serde_json::to_string(&acc).unwrap();
        assert!(raw.contains("\"age\":21,"));
    }

    #[test]
    fn stored_accounts_without_age_still_load() {
        let acc: UserAccount = serde_json::from_str(
            r#"{"username":"old","password":"12345","email":"o@x"}"#,
        )
        .unwrap();
        assert!(acc.age.is_none());
    }

    #[test]
    fn empty_optional_fields_are_ignored() {
        let input = NewUserAccount { full_name: Some(String::new()), gender: Some(String::new()), ..valid() };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn profile_omits_password() {
        let acc = valid().into_account().unwrap();
        let value = serde_json::to_value(UserProfile::from(&acc)).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["username"], "abc");
    }

    #[test]
    fn body_uses_camel_case_full_name() {
        let input: NewUserAccount = serde_json::from_str(
            r#"{"username":"abcd","password":"12345","fullName":"Jane Q. Public","age":30,"email":"j@x.io"}"#,
        )
        .unwrap();
        assert_eq!(input.full_name.as_deref(), Some("Jane Q. Public"));
        assert!(input.validate().is_ok());
    }
}
