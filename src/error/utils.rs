use std::error::Error as StdError;

struct Chain<'a> {
    curr: Option<&'a dyn StdError>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a dyn StdError;

    fn next(&mut self) -> Option<Self::Item> {
        let err = self.curr?;
        self.curr = err.source();
        Some(err)
    }
}

/// Iterates over `err` followed by its chain of sources.
pub fn error_chain(err: &dyn StdError) -> impl Iterator<Item = &dyn StdError> {
    Chain { curr: Some(err) }
}

/// Message of `err` with the messages of its sources nested in brackets, e.g.
/// `outer, source_msg=[inner, source_msg=[root]]`.
pub fn error_recursive_msg(err: &dyn StdError) -> String {
    let mut buf = String::new();
    let mut closing = String::new();

    for (i, item) in error_chain(err).enumerate() {
        if i > 0 {
            buf.push_str(", source_msg=[");
            closing.push(']');
        }
        buf.push_str(&item.to_string());
    }

    buf.push_str(&closing);
    buf
}
