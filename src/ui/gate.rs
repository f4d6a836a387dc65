use iced::widget::{button, center, column, container, text, text_input};
use iced::{Alignment, Element, Length};

use crate::Message;

/// Password prompt shown until the gate is unlocked
pub fn view<'a>(password: &'a str, error: Option<&'static str>) -> Element<'a, Message> {
    let input = text_input("Enter password", password)
        .on_input(Message::PasswordChanged)
        .on_submit(Message::PasswordSubmitted)
        .secure(true)
        .padding(12)
        .width(Length::Fill);

    let mut content = column![
        text("Enter Password").size(36),
        text("This portfolio is password protected. Please enter the password to continue.")
            .size(16),
        input,
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    if let Some(error) = error {
        content = content.push(text(error).size(14).style(text::danger));
    }

    content = content
        .push(
            button("Continue")
                .on_press(Message::PasswordSubmitted)
                .padding([10, 24])
                .style(button::primary),
        )
        .push(
            text("If you do not have the password, contact me and I am more than happy to give it to you!")
                .size(14)
                .style(text::secondary),
        );

    center(
        container(content)
            .max_width(400.0)
            .padding(32)
            .style(container::rounded_box),
    )
    .into()
}
