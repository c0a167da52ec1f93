use std::fmt::{self, Display, Formatter};

/// The outcome of a single command
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Response {
    /// No data, e.g. `First` on an empty list
    Nil,
    /// Whether a mutation or membership test succeeded
    Bool(bool),
    /// An element
    Integer(i64),
    /// The command could not be carried out
    Error(String),
}

impl Response {
    /// How much the response adds to the running checksum: one for a successful `Add`,
    /// `Remove` or `Contains`, the element itself for queries, nothing otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// # use response::Response;
    /// #
    /// assert_eq!(Response::Bool(true).contribution(), Some(1));
    /// assert_eq!(Response::Bool(false).contribution(), None);
    /// assert_eq!(Response::Integer(-5).contribution(), Some(-5));
    /// assert_eq!(Response::Nil.contribution(), None);
    /// ```
    pub fn contribution(&self) -> Option<i64> {
        match *self {
            Response::Bool(true) => Some(1),
            Response::Integer(i) => Some(i),
            Response::Bool(false) | Response::Nil | Response::Error(_) => None,
        }
    }

    /// Returns true if and only if the response is an error.
    pub fn is_error(&self) -> bool {
        match *self {
            Response::Error(_) => true,
            _ => false,
        }
    }
}

impl From<Option<i64>> for Response {
    fn from(value: Option<i64>) -> Response {
        match value {
            Some(v) => Response::Integer(v),
            None => Response::Nil,
        }
    }
}

impl From<bool> for Response {
    fn from(value: bool) -> Response {
        Response::Bool(value)
    }
}

impl Display for Response {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Response::Nil => f.write_str("(nil)"),
            Response::Bool(b) => write!(f, "{}", b),
            Response::Integer(i) => write!(f, "(integer) {}", i),
            Response::Error(ref e) => write!(f, "(error) {}", e),
        }
    }
}
