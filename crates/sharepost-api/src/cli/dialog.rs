//! `sharepost dialog`: print the dialog request built for a post.

use sharepost_core::dialog::builder::DialogRequestBuilder;
use sharepost_core::host::state::StateSnapshot;
use sharepost_types::channel::{Channel, ChannelType};
use sharepost_types::config::ClientConfig;

pub fn print_dialog(post_id: &str, channel_type: ChannelType, site_url: Option<String>) -> anyhow::Result<()> {
    let channel = Channel {
        id: String::new(),
        team_id: String::new(),
        name: String::new(),
        display_name: String::new(),
        channel_type,
    };
    let state = StateSnapshot::new(Some(ClientConfig { site_url }), Some(channel));
    let request = DialogRequestBuilder::new().build(post_id, &state);

    println!("{}", serde_json::to_string_pretty(&request)?);
    Ok(())
}
