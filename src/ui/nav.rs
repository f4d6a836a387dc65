use iced::widget::{button, container, horizontal_space, row, text};
use iced::{Alignment, Element, Length, Theme};

use crate::router::{self, Location};
use crate::Message;

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

/// Top navigation bar. On the about page only "Myself" is listed.
pub fn view<'a>(current: &Location, can_go_back: bool, can_go_forward: bool) -> Element<'a, Message> {
    let mut bar = row![
        button(text("←"))
            .on_press_maybe(can_go_back.then_some(Message::Back))
            .style(button::text),
        button(text("→"))
            .on_press_maybe(can_go_forward.then_some(Message::Forward))
            .style(button::text),
        button(text("Michael Hoefert").size(18))
            .on_press(Message::Navigate(Location::home(None)))
            .style(button::text),
        horizontal_space(),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    for item in router::visible_nav_items(current) {
        let style: ButtonStyle = if router::is_active(&item, current) {
            button::primary
        } else {
            button::secondary
        };
        bar = bar.push(
            button(text(item.name))
                .on_press(Message::Navigate(item.target))
                .padding([8, 16])
                .style(style),
        );
    }

    container(bar)
        .padding([12, 24])
        .width(Length::Fill)
        .into()
}
