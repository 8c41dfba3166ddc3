//! VAST 3.0 Renderer
//!
//! Serializes a [`Decision`] into the document players consume. "No ad"
//! renders as an empty `<VAST>` element, which every player treats as
//! "skip the break".

use crate::application::config::VastConfig;
use crate::domain::engine::{Decision, Placement};
use crate::domain::services::format_duration;
use std::borrow::Cow;

/// Response `Content-Type`
pub const VAST_CONTENT_TYPE: &str = "application/xml; charset=UTF-8";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Linear tracking events emitted when a beacon sink is configured
const TRACKING_EVENTS: [&str; 5] = [
    "start",
    "firstQuartile",
    "midpoint",
    "thirdQuartile",
    "complete",
];

pub fn render(decision: &Decision, config: &VastConfig) -> String {
    match decision {
        Decision::Serve(placement) => render_placement(placement, config),
        Decision::NoAd(_) => render_empty(),
    }
}

/// Fail-open document: valid VAST, no `<Ad>`
pub fn render_empty() -> String {
    format!(r#"{XML_DECLARATION}<VAST version="3.0"></VAST>"#)
}

fn render_placement(placement: &Placement, config: &VastConfig) -> String {
    let id = placement.ad.id.as_deref().filter(|id| !id.is_empty());
    let ad_id = escape_xml(id.unwrap_or("ad"));
    let ad_title = escape_xml(id.unwrap_or("Ad"));
    let ad_system = escape_xml(&config.ad_system);
    let ad_system_version = escape_xml(&config.ad_system_version);
    let duration = format_duration(placement.duration_seconds);
    let media = &placement.media;

    let mut beacons = String::new();
    let mut tracking = String::new();
    if let Some(url) = config.tracking_url.as_deref() {
        let url = cdata(url);
        beacons.push_str(&format!(
            "\n      <Error>{url}</Error>\n      <Impression>{url}</Impression>"
        ));
        tracking.push_str("\n            <TrackingEvents>");
        for event in TRACKING_EVENTS {
            tracking.push_str(&format!(
                "\n              <Tracking event=\"{event}\">{url}</Tracking>"
            ));
        }
        tracking.push_str("\n            </TrackingEvents>");
    }

    format!(
        r#"{XML_DECLARATION}
<VAST version="3.0">
  <Ad id="{ad_id}">
    <InLine>
      <AdSystem version="{ad_system_version}">{ad_system}</AdSystem>
      <AdTitle>{ad_title}</AdTitle>{beacons}
      <Creatives>
        <Creative sequence="1" id="{ad_id}">
          <Linear>
            <Duration>{duration}</Duration>{tracking}
            <MediaFiles>
              <MediaFile delivery="{delivery}" type="{mime}" width="{width}" height="{height}">{url}</MediaFile>
            </MediaFiles>
          </Linear>
        </Creative>
      </Creatives>
    </InLine>
  </Ad>
</VAST>"#,
        delivery = media.delivery.as_str(),
        mime = media.mime_type(),
        width = config.media_width,
        height = config.media_height,
        url = cdata(&media.url),
    )
}

/// Escape the five XML special characters
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Wrap in a CDATA section; an embedded `]]>` is split across two sections
pub fn cdata(s: &str) -> String {
    format!("<![CDATA[{}]]>", s.replace("]]>", "]]]]><![CDATA[>"))
}
