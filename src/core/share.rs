//! Share button fallback chain: native share sheet, then clipboard, then a
//! hint asking the visitor to copy the link by hand.

use crate::error::ShareError;
use crate::name::DisplayName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    pub fn for_name(name: &DisplayName, url: impl Into<String>) -> Self {
        Self {
            title: "Will you be my Valentine?".to_string(),
            text: format!("Will you be my Valentine, {name}?"),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    /// Nothing worked; show the URL for manual copying.
    Manual(String),
}

impl ShareOutcome {
    /// Text for the transient hint, if the outcome warrants one.
    pub fn hint(&self) -> Option<String> {
        match self {
            ShareOutcome::Shared => None,
            ShareOutcome::Copied => Some("Link copied!".to_string()),
            ShareOutcome::Manual(url) => Some(format!("Copy this link: {url}")),
        }
    }
}

/// Platform share capabilities. Any error makes the chain move on.
#[allow(async_fn_in_trait)]
pub trait ShareTarget {
    fn can_share_natively(&self) -> bool;
    async fn share_native(&self, payload: &SharePayload) -> Result<(), ShareError>;
    fn has_clipboard(&self) -> bool;
    async fn write_clipboard(&self, text: &str) -> Result<(), ShareError>;
}

pub async fn share_with_fallback<T: ShareTarget>(target: &T, payload: &SharePayload) -> ShareOutcome {
    if target.can_share_natively() {
        match target.share_native(payload).await {
            Ok(()) => return ShareOutcome::Shared,
            Err(e) => tracing::warn!("{e}; trying clipboard"),
        }
    }

    if target.has_clipboard() {
        match target.write_clipboard(&payload.url).await {
            Ok(()) => return ShareOutcome::Copied,
            Err(e) => tracing::warn!("{e}; falling back to manual copy"),
        }
    }

    ShareOutcome::Manual(payload.url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::resolve_display_name;
    use std::cell::RefCell;

    struct FakeTarget {
        native: Option<Result<(), ShareError>>,
        clipboard: Option<Result<(), ShareError>>,
        calls: RefCell<Vec<&'static str>>,
    }

    impl ShareTarget for FakeTarget {
        fn can_share_natively(&self) -> bool {
            self.native.is_some()
        }

        async fn share_native(&self, _payload: &SharePayload) -> Result<(), ShareError> {
            self.calls.borrow_mut().push("native");
            self.native.clone().unwrap_or(Err(ShareError::Unavailable))
        }

        fn has_clipboard(&self) -> bool {
            self.clipboard.is_some()
        }

        async fn write_clipboard(&self, _text: &str) -> Result<(), ShareError> {
            self.calls.borrow_mut().push("clipboard");
            self.clipboard.clone().unwrap_or(Err(ShareError::Unavailable))
        }
    }

    fn payload() -> SharePayload {
        let name = resolve_display_name("?name=Sam", "x");
        SharePayload::for_name(&name, "https://example.test/?name=Sam")
    }

    fn run(native: Option<Result<(), ShareError>>, clipboard: Option<Result<(), ShareError>>) -> (ShareOutcome, Vec<&'static str>) {
        let target = FakeTarget {
            native,
            clipboard,
            calls: RefCell::new(Vec::new()),
        };
        let out = pollster::block_on(share_with_fallback(&target, &payload()));
        (out, target.calls.into_inner())
    }

    #[test]
    fn native_share_wins_when_it_works() {
        let (out, calls) = run(Some(Ok(())), Some(Ok(())));
        assert_eq!(out, ShareOutcome::Shared);
        assert_eq!(calls, ["native"]);
        assert_eq!(out.hint(), None);
    }

    #[test]
    fn declined_share_falls_through_to_clipboard() {
        let (out, calls) = run(Some(Err(ShareError::Declined)), Some(Ok(())));
        assert_eq!(out, ShareOutcome::Copied);
        assert_eq!(calls, ["native", "clipboard"]);
        assert_eq!(out.hint().as_deref(), Some("Link copied!"));
    }

    #[test]
    fn missing_apis_end_in_manual_hint() {
        let (out, calls) = run(None, None);
        assert_eq!(out, ShareOutcome::Manual("https://example.test/?name=Sam".to_string()));
        assert!(calls.is_empty());

        let (out, calls) = run(None, Some(Err(ShareError::Failed("denied".into()))));
        assert!(matches!(out, ShareOutcome::Manual(_)));
        assert_eq!(calls, ["clipboard"]);
        assert_eq!(
            out.hint().as_deref(),
            Some("Copy this link: https://example.test/?name=Sam")
        );
    }

    #[test]
    fn payload_mentions_the_name() {
        let p = payload();
        assert_eq!(p.text, "Will you be my Valentine, Sam?");
    }
}
