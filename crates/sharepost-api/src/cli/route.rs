//! `sharepost route`: print the plugin route and dialog submission URL.

use sharepost_core::dialog::route::ServerRouteConfig;
use sharepost_types::config::ClientConfig;

pub fn print_route(site_url: Option<String>, json: bool) -> anyhow::Result<()> {
    let route = ServerRouteConfig::from_config(Some(&ClientConfig { site_url }));

    if json {
        let out = serde_json::json!({
            "base_path": route.base_path,
            "plugin_id": route.plugin_id,
            "plugin_route": route.plugin_route(),
            "share_url": route.share_url(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", route.plugin_route());
        println!("{}", route.share_url());
    }
    Ok(())
}
