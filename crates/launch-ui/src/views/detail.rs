//! Launch detail view.
//!
//! Every field has a placeholder. A missing launch renders the same list
//! with placeholders throughout, so "not found" and "failed" look alike.

use launch_core::{LaunchDetail, Messages};
use launch_dom::Element;

/// Link back to the front page.
pub fn back_link(messages: &Messages) -> Element {
    Element::new("div").class("back").child(
        Element::new("a")
            .attr("href", "/")
            .child(messages.back.as_str()),
    )
}

/// Build the detail list: name, launch window, status, mission, image.
pub fn launch_details(detail: Option<&LaunchDetail>, messages: &Messages) -> Element {
    let field = |value: Option<&str>| messages.or_unknown(value).to_string();

    let name = field(detail.and_then(|d| d.name.as_deref()));
    let window_start = field(detail.and_then(|d| d.window_start.as_deref()));
    let window_end = field(detail.and_then(|d| d.window_end.as_deref()));
    let status_name = field(detail.and_then(LaunchDetail::status_name));
    let status_description = field(detail.and_then(LaunchDetail::status_description));
    let mission_name = field(detail.and_then(LaunchDetail::mission_name));
    let mission_description = field(detail.and_then(LaunchDetail::mission_description));

    let image = match detail.and_then(|d| d.image.as_deref()) {
        Some(src) => Element::new("li")
            .class("image")
            .child(Element::new("img").attr("src", src).attr("alt", name.as_str())),
        None => Element::new("li")
            .class("image missing")
            .child(messages.no_image.as_str()),
    };

    Element::new("ul")
        .class("launch")
        .child(
            Element::new("li")
                .class("name")
                .child(Element::new("h1").child(name.as_str())),
        )
        .child(item(
            "window-start",
            format!("{}{}", messages.window_start_prefix, window_start),
        ))
        .child(item(
            "window-end",
            format!("{}{}", messages.window_end_prefix, window_end),
        ))
        .child(item(
            "status",
            format!("{}{}", messages.status_prefix, status_name),
        ))
        .child(item("status-description", status_description))
        .child(item(
            "mission",
            format!("{}{}", messages.mission_prefix, mission_name),
        ))
        .child(item("mission-description", mission_description))
        .child(image)
}

fn item(class: &str, text: String) -> Element {
    Element::new("li").class(class).child(text)
}
