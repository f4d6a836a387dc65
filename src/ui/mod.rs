/// View functions for each screen and overlay

pub mod gate;
pub mod grid;
pub mod images;
pub mod nav;
pub mod overlay;
pub mod page;

use chrono::{Datelike, Local};
use iced::widget::{button, column, container, row, text, Row};
use iced::{Alignment, Element, Length};

use crate::state::carousel::CarouselState;
use crate::state::data::Stat;
use crate::{Message, Step};

/// Previous / dots / next controls for a gallery with more than one image
pub fn carousel_controls<'a>(
    carousel: CarouselState,
    to_message: impl Fn(Step) -> Message,
) -> Element<'a, Message> {
    let mut controls = Row::new()
        .spacing(6)
        .align_y(Alignment::Center)
        .push(
            button(text("‹").size(18))
                .on_press(to_message(Step::Prev))
                .style(button::secondary),
        );

    for index in 0..carousel.len() {
        let dot = if index == carousel.index() { "●" } else { "○" };
        controls = controls.push(
            button(text(dot).size(12))
                .on_press(to_message(Step::GoTo(index)))
                .padding(2)
                .style(button::text),
        );
    }

    controls
        .push(
            button(text("›").size(18))
                .on_press(to_message(Step::Next))
                .style(button::secondary),
        )
        .into()
}

/// Value-over-label stat blocks, rendered verbatim
pub fn stats_row<'a>(stats: &'a [Stat], value_size: u16) -> Element<'a, Message> {
    let mut stats_row = row![].spacing(24);
    for stat in stats {
        stats_row = stats_row.push(
            column![
                text(&stat.value).size(value_size),
                text(&stat.label).size(12).style(text::secondary),
            ]
            .spacing(2),
        );
    }
    stats_row.into()
}

/// Copyright line shown under every page
pub fn footer<'a>() -> Element<'a, Message> {
    container(
        text(format!("© {} Michael Hoefert. All rights reserved.", Local::now().year()))
            .size(12)
            .style(text::secondary),
    )
    .padding(24)
    .center_x(Length::Fill)
    .into()
}
