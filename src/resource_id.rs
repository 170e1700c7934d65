//! Resource identifiers carried in `resourceURL` fields.
//!
//! AerFrame never returns a bare `id`. The canonical identifier of an
//! application, channel or subscription is whatever follows a fixed path
//! segment in its `resourceURL`.

/// Separator preceding an application ID.
pub const APPLICATIONS: &str = "/applications/";

/// Separator preceding a notification channel ID.
pub const CHANNELS: &str = "/channels/";

/// Separator preceding an inbound or outbound subscription ID.
pub const SUBSCRIPTIONS: &str = "/subscriptions/";

/// Extract the identifier following `separator` in `resource_url`.
///
/// Everything after the first occurrence of the separator is returned, less
/// any extra leading slashes (the inbound subscription service emits
/// `.../subscriptions//{id}`). Returns `None` when the separator is absent.
///
/// ```
/// use aerisapi::resource_id::{extract, APPLICATIONS};
///
/// let url = "https://api.aerframe.aeris.com/registration/v2/1/applications/44444444-2943";
/// assert_eq!(extract(url, APPLICATIONS), Some("44444444-2943"));
/// ```
pub fn extract<'a>(resource_url: &'a str, separator: &str) -> Option<&'a str> {
    resource_url
        .split_once(separator)
        .map(|(_, id)| id.trim_start_matches('/'))
}

/// Scan left to right and keep the last element satisfying `predicate`.
///
/// Duplicate short names or tags are possible on the vendor side; the last
/// one listed wins.
pub(crate) fn last_match<T, P>(items: &[T], predicate: P) -> Option<&T>
where
    P: FnMut(&&T) -> bool,
{
    items.iter().filter(predicate).last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_application_id() {
        let url = "https://localhost/registration/v2/123/applications/44444444-2943-1346-6c49-123456789abc";
        assert_eq!(
            extract(url, APPLICATIONS),
            Some("44444444-2943-1346-6c49-123456789abc")
        );
    }

    #[test]
    fn test_extract_missing_separator() {
        let url = "https://localhost/notificationchannel/v2/123/longpoll/abc";
        assert_eq!(extract(url, CHANNELS), None);
    }

    #[test]
    fn test_extract_double_slash() {
        let url = "https://localhost/smsmessaging/v2/123/inbound/subscriptions//sub-2";
        assert_eq!(extract(url, SUBSCRIPTIONS), Some("sub-2"));
    }

    #[test]
    fn test_extract_keeps_everything_after_first_separator() {
        let url = "https://localhost/notificationchannel/v2/1/channels/abc/callback";
        assert_eq!(extract(url, CHANNELS), Some("abc/callback"));
    }

    #[test]
    fn test_last_match_wins() {
        let items = [("a", 1), ("b", 2), ("a", 3)];
        assert_eq!(last_match(&items, |(k, _)| *k == "a"), Some(&("a", 3)));
        assert_eq!(last_match(&items, |(k, _)| *k == "z"), None);
        assert_eq!(last_match::<(&str, i32), _>(&[], |_| true), None);
    }
}
