use iced::widget::{button, column, container, row, text, Column};
use iced::{Element, Length};

use crate::pages::{Block, Page, PageEntry};
use crate::router::Location;
use crate::Message;

/// Render a content page. The about page also links every indexed page.
pub fn view<'a>(page: &'a Page, entries: &'a [PageEntry]) -> Element<'a, Message> {
    let mut content: Column<'a, Message> = column![
        text(&page.title).size(40),
        text(&page.description).size(18).style(text::secondary),
    ]
    .spacing(16);

    for block in &page.blocks {
        content = match block {
            Block::Heading(heading) => content.push(text(heading).size(24)),
            Block::Paragraph(paragraph) => content.push(text(paragraph).size(16)),
            Block::Link { label, target } => content.push(
                row![text(label).size(16), text(target).size(16).style(text::primary)].spacing(8),
            ),
        };
    }

    if page.id == "about" && !entries.is_empty() {
        content = content.push(text("Product process").size(24));
        for entry in entries {
            content = content.push(
                button(text(&entry.title))
                    .on_press(Message::Navigate(Location::page(entry.id.clone())))
                    .style(button::text),
            );
        }
    }

    container(content.max_width(800.0))
        .padding(40)
        .center_x(Length::Fill)
        .into()
}

pub fn missing<'a>(error: &'a str) -> Element<'a, Message> {
    container(
        column![
            text("Page not found").size(32),
            text(error).style(text::danger),
            button("Back home").on_press(Message::Navigate(Location::home(None))),
        ]
        .spacing(16),
    )
    .padding(40)
    .center_x(Length::Fill)
    .into()
}
