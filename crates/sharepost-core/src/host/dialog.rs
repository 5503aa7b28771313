//! The host's "open interactive dialog" primitive.

use sharepost_types::dialog::OpenDialogRequest;

/// Hands a dialog to the host for rendering.
///
/// Fire-and-forget: rendering and submission errors surface in the host UI,
/// never to the caller.
pub trait DialogOpener: Send + Sync {
    fn open_interactive_dialog(&self, request: OpenDialogRequest);
}

impl<T: DialogOpener + ?Sized> DialogOpener for std::sync::Arc<T> {
    fn open_interactive_dialog(&self, request: OpenDialogRequest) {
        (**self).open_interactive_dialog(request)
    }
}
