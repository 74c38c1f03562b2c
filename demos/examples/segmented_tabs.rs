// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A segmented pager driven by taps, a drag, and a toolbar change.
//!
//! This example shows how to:
//! - supply pages and titles through a `SegmentedPagerDataSource`,
//! - observe selection through a `SegmentedPagerDelegate`,
//! - forward scroll-container signals with `SegmentedPager::drive_pager`.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example segmented_tabs`

use kurbo::{Point, Rect, Size, Vec2};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use understory_pager::{Page, ReuseRegistry};
use understory_segmented_pager::{
    ParallaxHeader, SectionCapabilities, SegmentedHost, SegmentedPage, SegmentedPager,
    SegmentedPagerCapabilities, SegmentedPagerDataSource, SegmentedPagerDelegate,
};

/// A page that remembers which feed it shows and where it is placed.
#[derive(Clone, Debug, Default)]
struct Feed {
    identifier: Option<String>,
    topic: String,
    frame: Rect,
}

impl Page for Feed {
    fn reuse_identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    fn set_reuse_identifier(&mut self, identifier: &str) {
        self.identifier = Some(identifier.to_owned());
    }

    fn prepare_for_reuse(&mut self) {
        self.topic.clear();
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }
}

impl SegmentedPage for Feed {}

struct Topics(Vec<&'static str>);

impl SegmentedPagerDataSource<Feed> for Topics {
    fn number_of_pages(&mut self) -> usize {
        self.0.len()
    }

    fn page_at(&mut self, index: usize, reuse: &mut ReuseRegistry<Feed>) -> Feed {
        let mut feed = reuse.dequeue("feed").unwrap_or_default();
        feed.topic = self.0[index].to_owned();
        feed
    }

    fn section_capabilities(&self) -> SectionCapabilities {
        SectionCapabilities::TITLE
    }

    fn title_for_section(&mut self, index: usize) -> String {
        self.0[index].to_owned()
    }
}

struct Log;

impl SegmentedPagerDelegate<Feed> for Log {
    fn capabilities(&self) -> SegmentedPagerCapabilities {
        SegmentedPagerCapabilities::DID_SELECT_PAGE
            | SegmentedPagerCapabilities::DID_SELECT_PAGE_TITLED
            | SegmentedPagerCapabilities::DID_SCROLL_HEADER
    }

    fn did_select_page(&mut self, page: &mut Feed) {
        tracing::info!(topic = %page.topic, frame = ?page.frame, "selected page");
    }

    fn did_select_page_titled(&mut self, title: &str) {
        tracing::info!(title, "selected title");
    }

    fn did_scroll_header(&mut self, header: &ParallaxHeader) {
        tracing::info!(height = header.height, "header scrolled");
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,understory_pager=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut segmented: SegmentedPager<Feed> = SegmentedPager::default();
    segmented
        .pager_mut()
        .reuse_mut()
        .register_template("feed", Feed::default());
    segmented.set_header(ParallaxHeader::new(120.0, 0.0));

    let mut topics = Topics(vec!["News", "Sports", "Weather", "Travel"]);
    let mut log = Log;
    let mut host = SegmentedHost::detached()
        .with_data_source(&mut topics)
        .with_delegate(&mut log);

    segmented.layout(Size::new(360.0, 640.0), &mut host);
    tracing::info!(frames = ?segmented.frames(), "laid out");

    // Segments stretch to 90 wide; this tap lands on "Weather".
    let outcome = segmented.tap_control(200.0, &mut host);
    tracing::info!(?outcome, "tapped control");
    segmented.drive_pager(&mut host, |pager, h| pager.did_end_scrolling_animation(h));

    // Drag back one page.
    segmented.drive_pager(&mut host, |pager, h| {
        pager.will_begin_dragging(h);
        let mut target = Point::new(360.0, 0.0);
        pager.will_end_dragging(Vec2::new(1.5, 0.0), &mut target, h);
        pager.did_end_dragging(true, h);
        pager.did_scroll(target, h);
        pager.did_end_decelerating(h);
    });
    tracing::info!(index = segmented.current_index(), "after drag");

    for update in segmented.set_toolbar_height(48.0, &mut host) {
        tracing::info!(region = ?update.region, frame = ?update.frame, "toolbar relayout");
    }

    segmented.did_scroll_content(Point::new(0.0, -60.0), &mut host);
    let top = segmented.scroll_to_top();
    tracing::info!(?top, "scrolled to top");
}
