//! The "Share post" dialog builder.
//!
//! Element order is part of the contract: the host renders and submits
//! elements in declared order and keys the submission by `name`.
//!
//! 1. `to_channel`      -- channel selector
//! 2. `force_share`     -- confirmation, only when the channel is not open
//! 3. `share_type`      -- share/move radio, default `share`
//! 4. `additional_text` -- optional free text

use sharepost_types::channel::is_open_channel;
use sharepost_types::dialog::{Dialog, DialogElement, DialogOption, OpenDialogRequest};
use sharepost_types::share::{
    ADDITIONAL_TEXT_KEY, FORCE_SHARE_KEY, SHARE_TYPE_KEY, ShareType, TO_CHANNEL_KEY,
};

use crate::dialog::route::ServerRouteConfig;
use crate::host::state::AppStateReader;

pub const DIALOG_TITLE: &str = "Share post";
pub const SUBMIT_LABEL: &str = "Share";

const FORCE_SHARE_LABEL: &str =
    "This channel is not public. Are you sure to share this post to other channel?";
const FORCE_SHARE_PLACEHOLDER: &str = "Yes, I confirm that this post share to other channel.";

/// Builds the dialog request for sharing or moving one post.
///
/// Stateless: identical inputs always yield an identical request.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogRequestBuilder;

impl DialogRequestBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Compose the dialog for `post_id` from the current application state.
    ///
    /// A missing channel is treated as not open, so the confirmation element
    /// is shown.
    pub fn build<S: AppStateReader + ?Sized>(&self, post_id: &str, state: &S) -> OpenDialogRequest {
        let route = ServerRouteConfig::from_config(state.config().as_ref());
        let channel = state.current_channel();

        let mut elements = Vec::with_capacity(4);
        elements.push(channel_select());
        if !is_open_channel(channel.as_ref()) {
            elements.push(force_share_confirmation());
        }
        elements.push(share_type_radio());
        elements.push(additional_text());

        OpenDialogRequest {
            trigger_id: None,
            url: route.share_url(),
            dialog: Dialog {
                callback_id: post_id.to_string(),
                title: DIALOG_TITLE.to_string(),
                elements,
                submit_label: SUBMIT_LABEL.to_string(),
            },
        }
    }
}

fn channel_select() -> DialogElement {
    DialogElement::Select {
        display_name: "Share to...".to_string(),
        name: TO_CHANNEL_KEY.to_string(),
        data_source: "channels".to_string(),
        placeholder: "Find a channel to share".to_string(),
    }
}

fn force_share_confirmation() -> DialogElement {
    DialogElement::Bool {
        display_name: FORCE_SHARE_LABEL.to_string(),
        name: FORCE_SHARE_KEY.to_string(),
        placeholder: FORCE_SHARE_PLACEHOLDER.to_string(),
    }
}

fn share_type_radio() -> DialogElement {
    DialogElement::Radio {
        display_name: "Share type".to_string(),
        name: SHARE_TYPE_KEY.to_string(),
        default: ShareType::Share.as_str().to_string(),
        options: vec![
            DialogOption::new("Share", ShareType::Share.as_str()),
            DialogOption::new("Move", ShareType::Move.as_str()),
        ],
    }
}

fn additional_text() -> DialogElement {
    DialogElement::Textarea {
        display_name: "Additional Text".to_string(),
        name: ADDITIONAL_TEXT_KEY.to_string(),
        placeholder: "Write an additional text (optional)".to_string(),
        optional: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::route::PLUGIN_ID;
    use crate::host::state::StateSnapshot;
    use sharepost_types::channel::{Channel, ChannelType};
    use sharepost_types::config::ClientConfig;

    fn channel(channel_type: ChannelType) -> Channel {
        Channel {
            id: "ch1".to_string(),
            team_id: "team1".to_string(),
            name: "general".to_string(),
            display_name: "General".to_string(),
            channel_type,
        }
    }

    fn state(channel_type: Option<ChannelType>, site_url: Option<&str>) -> StateSnapshot {
        StateSnapshot::new(
            site_url.map(ClientConfig::with_site_url),
            channel_type.map(channel),
        )
    }

    #[test]
    fn test_public_channel_has_three_elements() {
        let req = DialogRequestBuilder::new().build("post123", &state(Some(ChannelType::Open), None));
        assert_eq!(
            req.dialog.element_names(),
            vec!["to_channel", "share_type", "additional_text"]
        );
        assert!(req.dialog.element(FORCE_SHARE_KEY).is_none());
    }

    #[test]
    fn test_non_public_channels_get_confirmation_second() {
        for channel_type in [
            Some(ChannelType::Private),
            Some(ChannelType::Direct),
            Some(ChannelType::Group),
            Some(ChannelType::Unknown),
            None,
        ] {
            let req = DialogRequestBuilder::new().build("p", &state(channel_type, None));
            assert_eq!(
                req.dialog.element_names(),
                vec!["to_channel", "force_share", "share_type", "additional_text"],
                "channel type {channel_type:?}"
            );
            assert_eq!(req.dialog.elements[1].kind(), "bool");
        }
    }

    #[test]
    fn test_force_share_is_required() {
        let req = DialogRequestBuilder::new().build("p", &state(Some(ChannelType::Private), None));
        let value = serde_json::to_value(&req.dialog.elements[1]).unwrap();
        assert_eq!(value["display_name"], FORCE_SHARE_LABEL);
        assert_eq!(value["placeholder"], FORCE_SHARE_PLACEHOLDER);
        assert!(value.get("optional").is_none());
    }

    #[test]
    fn test_share_type_options() {
        let req = DialogRequestBuilder::new().build("p", &state(Some(ChannelType::Open), None));
        match req.dialog.element(SHARE_TYPE_KEY) {
            Some(DialogElement::Radio { default, options, .. }) => {
                assert_eq!(default, "share");
                let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                assert_eq!(values, vec!["share", "move"]);
            }
            other => panic!("expected radio, got {other:?}"),
        }
    }

    #[test]
    fn test_additional_text_is_last_and_optional() {
        let req = DialogRequestBuilder::new().build("p", &state(Some(ChannelType::Private), None));
        match req.dialog.elements.last() {
            Some(DialogElement::Textarea { name, optional, .. }) => {
                assert_eq!(name, ADDITIONAL_TEXT_KEY);
                assert!(*optional);
            }
            other => panic!("expected textarea, got {other:?}"),
        }
    }

    #[test]
    fn test_callback_id_is_post_id_verbatim() {
        for post_id in ["post123", "a b/c", "ünïcode"] {
            let req = DialogRequestBuilder::new().build(post_id, &state(None, None));
            assert_eq!(req.dialog.callback_id, post_id);
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        let s = state(Some(ChannelType::Private), Some("https://chat.co/team1/"));
        let builder = DialogRequestBuilder::new();
        let first = serde_json::to_string(&builder.build("post123", &s)).unwrap();
        let second = serde_json::to_string(&builder.build("post123", &s)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_public_channel_without_site_url() {
        let req = DialogRequestBuilder::new().build("post123", &state(Some(ChannelType::Open), None));
        assert_eq!(req.dialog.elements.len(), 3);
        assert_eq!(req.url, format!("/plugins/{PLUGIN_ID}/api/v1/share"));
        assert_eq!(req.dialog.callback_id, "post123");
        assert_eq!(req.dialog.title, DIALOG_TITLE);
        assert_eq!(req.dialog.submit_label, SUBMIT_LABEL);
    }

    #[test]
    fn test_private_channel_with_sub_path() {
        let req = DialogRequestBuilder::new().build(
            "post123",
            &state(Some(ChannelType::Private), Some("https://chat.co/team1/")),
        );
        assert_eq!(req.dialog.elements.len(), 4);
        assert_eq!(req.dialog.elements[1].name(), FORCE_SHARE_KEY);
        assert_eq!(req.url, format!("/team1/plugins/{PLUGIN_ID}/api/v1/share"));
    }

    #[test]
    fn test_serialized_shape_matches_host_schema() {
        let req = DialogRequestBuilder::new().build("post123", &state(Some(ChannelType::Open), None));
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["dialog"]["elements"][0]["type"], "select");
        assert_eq!(value["dialog"]["elements"][0]["data_source"], "channels");
        assert_eq!(value["dialog"]["elements"][1]["type"], "radio");
        assert_eq!(value["dialog"]["elements"][1]["options"][1]["value"], "move");
        assert_eq!(value["dialog"]["elements"][2]["type"], "textarea");
        assert_eq!(value["dialog"]["elements"][2]["optional"], true);
    }
}
