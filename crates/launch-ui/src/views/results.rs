//! Search results list.

use launch_core::{LaunchSummary, Messages};
use launch_dom::Element;

/// Build the results list for a finished search.
///
/// `None` means the search failed, an empty slice means it found nothing.
/// Otherwise there is one item per launch, in the order given.
pub fn search_results(
    results: Option<&[LaunchSummary]>,
    query: &str,
    messages: &Messages,
) -> Element {
    let list = Element::new("ul").class("results");

    let Some(results) = results else {
        return list.child(Element::new("li").child(messages.search_error_for(query)));
    };

    if results.is_empty() {
        return list.child(Element::new("li").child(messages.no_results_for(query)));
    }

    list.children(results.iter().map(|launch| result_item(launch, messages)))
}

fn result_item(launch: &LaunchSummary, messages: &Messages) -> Element {
    let mission = messages.or_unknown(launch.mission_name());
    Element::new("li")
        .class("result")
        .child(
            Element::new("a")
                .attr("href", launch.id.detail_href())
                .child(launch.name.as_str()),
        )
        .child(
            Element::new("span")
                .class("mission")
                .child(format!("{}{}", messages.mission_prefix, mission)),
        )
}
