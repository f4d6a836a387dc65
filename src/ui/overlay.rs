/// Detail and zoom overlays
///
/// Each overlay is a dimmed backdrop with its content centered on top.
/// Clicks on the content report a content target so they never reach the
/// backdrop beneath.
use iced::widget::{
    button, center, column, container, horizontal_space, image, mouse_area, opaque, row, scrollable, text,
};
use iced::{Alignment, Color, ContentFit, Element, Length};

use super::images::ImageCache;
use super::{carousel_controls, stats_row};
use crate::assets::Tier;
use crate::state::carousel::CarouselState;
use crate::state::data::{ImageRef, WorkItem};
use crate::state::expansion::ClickTarget;
use crate::{Message, OverlayEvent};

fn click(target: ClickTarget) -> Message {
    Message::Overlay(OverlayEvent::Click(target))
}

fn backdrop<'a>(content: impl Into<Element<'a, Message>>, alpha: f32, on_press: Message) -> Element<'a, Message> {
    opaque(
        mouse_area(center(content).padding(40).style(move |_theme| {
            container::Style {
                background: Some(Color { a: alpha, ..Color::BLACK }.into()),
                ..container::Style::default()
            }
        }))
        .on_press(on_press),
    )
}

pub fn detail<'a>(item: &'a WorkItem, carousel: CarouselState, images: &ImageCache) -> Element<'a, Message> {
    let current = carousel
        .current(&item.images)
        .cloned()
        .unwrap_or_else(ImageRef::missing);

    let header = row![
        column![
            text(&item.title).size(28),
            text(format!("{} · {}", item.name, item.location))
                .size(14)
                .style(text::secondary),
        ]
        .spacing(4)
        .width(Length::Fill),
        button(text("✕"))
            .on_press(Message::Overlay(OverlayEvent::Close))
            .style(button::text),
    ]
    .align_y(Alignment::Start);

    let picture = mouse_area(
        image(images.handle(&current, Tier::Detail))
            .width(Length::Fill)
            .height(Length::Fixed(420.0))
            .content_fit(ContentFit::Contain),
    )
    .on_press(click(ClickTarget::DetailImage));

    let mut body = column![header, picture].spacing(16);

    if carousel.has_multiple() {
        body = body.push(
            container(carousel_controls(carousel, |step| {
                Message::Overlay(OverlayEvent::Step(step))
            }))
            .center_x(Length::Fill),
        );
    }

    body = body
        .push(stats_row(&item.stats, 22))
        .push(text(&item.description).size(16));

    for paragraph in &item.additional_details {
        body = body.push(text(paragraph).size(15));
    }

    let content = mouse_area(
        container(scrollable(body.padding(8)))
            .max_width(900.0)
            .max_height(760.0)
            .padding(24)
            .style(container::rounded_box),
    )
    .on_press(click(ClickTarget::DetailContent));

    backdrop(content, 0.6, click(ClickTarget::DetailBackdrop))
}

pub fn zoom<'a>(zoomed: &ImageRef, carousel: CarouselState, images: &ImageCache) -> Element<'a, Message> {
    let mut body = column![
        row![
            text(format!("{} / {}", carousel.index() + 1, carousel.len())).style(text::secondary),
            horizontal_space(),
            button(text("✕"))
                .on_press(Message::Overlay(OverlayEvent::Unzoom))
                .style(button::secondary),
        ]
        .align_y(Alignment::Center),
        image(images.handle(zoomed, Tier::Full))
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain),
    ]
    .spacing(12)
    .align_x(Alignment::Center);

    if carousel.has_multiple() {
        body = body.push(carousel_controls(carousel, |step| {
            Message::Overlay(OverlayEvent::Step(step))
        }));
    }

    let content = mouse_area(body).on_press(click(ClickTarget::ZoomContent));

    backdrop(content, 0.92, click(ClickTarget::ZoomBackdrop))
}
