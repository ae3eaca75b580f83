// Rule token parsing

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Separates the rule name from its argument list.
pub const NAME_DELIMITER: char = ':';

/// Separates individual arguments.
pub const ARG_DELIMITER: char = ',';

/// A parsed rule token such as `"recaptcha:https://example.com/verify,secret"`.
///
/// Arguments are raw strings: no trimming, no escaping, no type conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub name: String,
    pub args: Vec<String>,
}

impl RuleSpec {
    /// Split on the first `:`; the remainder, if any, is split on every `,`.
    ///
    /// `"integer"` has no arguments while `"name:"` has one empty argument.
    pub fn parse(token: &str) -> Self {
        match token.split_once(NAME_DELIMITER) {
            None => Self {
                name: token.to_string(),
                args: Vec::new(),
            },
            Some((name, blob)) => Self {
                name: name.to_string(),
                args: blob.split(ARG_DELIMITER).map(str::to_string).collect(),
            },
        }
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

impl FromStr for RuleSpec {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            write!(f, "{}{}", NAME_DELIMITER, self.args.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_only() {
        let spec = RuleSpec::parse("integer");
        assert_eq!(spec.name, "integer");
        assert!(spec.args.is_empty());
    }

    #[test]
    fn test_name_with_args() {
        let spec = RuleSpec::parse("recaptcha:https://example.com/verify,s3cret");
        assert_eq!(spec.name, "recaptcha");
        assert_eq!(spec.args, vec!["https://example.com/verify", "s3cret"]);
        assert_eq!(spec.arg(1), Some("s3cret"));
        assert_eq!(spec.arg(2), None);
    }

    #[test]
    fn test_args_are_raw() {
        let spec = RuleSpec::parse("between: 1 ,,3");
        assert_eq!(spec.args, vec![" 1 ", "", "3"]);
    }

    #[test]
    fn test_trailing_delimiter_yields_empty_arg() {
        let spec = RuleSpec::parse("recaptcha:");
        assert_eq!(spec.name, "recaptcha");
        assert_eq!(spec.args, vec![""]);
    }

    #[test]
    fn test_empty_token() {
        let spec: RuleSpec = "".parse().unwrap();
        assert_eq!(spec.name, "");
        assert!(spec.args.is_empty());
    }

    #[test]
    fn test_display_round_trip() {
        let token = "recaptcha:https://example.com/verify,s3cret";
        assert_eq!(RuleSpec::parse(token).to_string(), token);
        assert_eq!(RuleSpec::parse("bool").to_string(), "bool");
    }
}
