use iced::widget::{button, column, container, horizontal_space, image, mouse_area, row, text};
use iced::{Alignment, ContentFit, Element, Length, Pixels};
use iced_aw::Wrap;
use std::collections::HashMap;
use std::sync::Arc;

use super::images::ImageCache;
use super::{carousel_controls, stats_row};
use crate::assets::Tier;
use crate::router::Location;
use crate::state::carousel::CarouselState;
use crate::state::data::{FilterTag, ImageRef, ItemId, WorkItem};
use crate::{CardEvent, Message};

const CARD_WIDTH: f32 = 340.0;
const CARD_IMAGE_HEIGHT: f32 = 200.0;

/// Home page: hero, section cards and the filterable portfolio grid
pub fn view<'a>(
    items: Vec<&'a Arc<WorkItem>>,
    active: Option<&'a FilterTag>,
    cards: &HashMap<ItemId, CarouselState>,
    images: &ImageCache,
) -> Element<'a, Message> {
    let hero = column![
        text("Hi, I'm Michael").size(48),
        text("I like to build products centered on customer experiences and go on biking adventures.")
            .size(18)
            .style(text::secondary),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    let sections = row![
        section_card(
            "My Product Management",
            "Roadmaps, launches and the teams behind them",
            "/my-product-management",
        ),
        section_card(
            "My Adventures",
            "Long rides, new places and the people met along the way",
            "/my-adventures",
        ),
    ]
    .spacing(24);

    let mut header = row![text("MY PORTFOLIO").size(24), horizontal_space()]
        .align_y(Alignment::Center)
        .spacing(12);
    if let Some(tag) = active {
        header = header
            .push(text(format!("Showing: {tag}")).style(text::secondary))
            .push(
                button(text("Clear Filter ✕"))
                    .on_press(Message::ClearFilter)
                    .style(button::secondary),
            );
    }

    let grid: Element<'a, Message> = if items.is_empty() {
        container(text("No work items match this filter.").style(text::secondary))
            .padding(40)
            .center_x(Length::Fill)
            .into()
    } else {
        let elements: Vec<Element<'a, Message>> = items
            .into_iter()
            .map(|item| {
                let carousel = cards
                    .get(&item.id)
                    .copied()
                    .unwrap_or_else(|| CarouselState::new(item.image_count()));
                card(item, carousel, images)
            })
            .collect();
        Wrap::with_elements(elements)
            .spacing(Pixels(24.0))
            .line_spacing(Pixels(24.0))
            .into()
    };

    column![hero, sections, header, grid]
        .spacing(32)
        .padding(32)
        .align_x(Alignment::Center)
        .into()
}

fn section_card<'a>(title: &'a str, blurb: &'a str, path: &'a str) -> Element<'a, Message> {
    button(
        column![text(title).size(22), text(blurb).size(14)]
            .spacing(6)
            .width(Length::Fixed(CARD_WIDTH)),
    )
    .on_press(Message::Navigate(Location::parse(path)))
    .padding(20)
    .style(button::secondary)
    .into()
}

/// One work item card. Clicking anywhere outside the controls opens the detail overlay.
fn card<'a>(item: &'a WorkItem, carousel: CarouselState, images: &ImageCache) -> Element<'a, Message> {
    let id = item.id;
    let current = carousel
        .current(&item.images)
        .cloned()
        .unwrap_or_else(ImageRef::missing);

    let author = row![
        image(images.handle(&item.avatar, Tier::Card))
            .width(Length::Fixed(40.0))
            .height(Length::Fixed(40.0))
            .content_fit(ContentFit::Cover),
        column![
            text(&item.name).size(14),
            text(&item.location).size(12).style(text::secondary),
        ],
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let mut body = column![
        author,
        text(&item.title).size(20),
        image(images.handle(&current, Tier::Card))
            .width(Length::Fill)
            .height(Length::Fixed(CARD_IMAGE_HEIGHT))
            .content_fit(ContentFit::Cover),
    ]
    .spacing(12);

    if carousel.has_multiple() {
        body = body.push(
            container(carousel_controls(carousel, move |step| {
                Message::Card(id, CardEvent::Step(step))
            }))
            .center_x(Length::Fill),
        );
    }

    body = body
        .push(stats_row(&item.stats, 18))
        .push(text(&item.description).size(14));

    mouse_area(
        container(body)
            .width(Length::Fixed(CARD_WIDTH))
            .padding(16)
            .style(container::rounded_box),
    )
    .on_press(Message::Card(id, CardEvent::Open))
    .into()
}
