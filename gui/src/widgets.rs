use iced::widget::{
    column, container, mouse_area, progress_bar, row, text, Column, Space,
};
use iced::{theme, Color, Element, Length, Theme};
use reputation_core::{round_to_hundredths, Platform, Record, Sentiment, SentimentSummary};

use crate::Message;

pub const POSITIVE: Color = Color::from_rgb(0.02, 0.59, 0.41);
pub const NEUTRAL: Color = Color::from_rgb(0.85, 0.47, 0.02);
pub const NEGATIVE: Color = Color::from_rgb(0.88, 0.11, 0.28);
const MUTED: Color = Color::from_rgb(0.45, 0.49, 0.55);

pub fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => POSITIVE,
        Sentiment::Neutral => NEUTRAL,
        Sentiment::Negative => NEGATIVE,
    }
}

pub fn card<'a>(content: impl Into<Element<'a, Message, Theme>>) -> Element<'a, Message, Theme> {
    container(content)
        .padding(16)
        .width(Length::Fill)
        .style(theme::Container::Box)
        .into()
}

fn stat(label: &str, value: String, color: Color) -> Element<'static, Message, Theme> {
    row![text(label.to_string()).size(13), text(value).size(13).style(color)]
        .spacing(6)
        .into()
}

fn share_bar(label: &str, pct: f64, color: Color) -> Element<'static, Message, Theme> {
    column![
        text(format!("{} {:.0}%", label, pct)).size(11).style(color),
        progress_bar(0.0..=100.0, pct as f32).height(6),
    ]
    .spacing(2)
    .into()
}

pub fn summary_card(summary: &SentimentSummary) -> Element<'static, Message, Theme> {
    let distribution = summary.distribution();

    card(
        column![
            row![
                text("Sentiment summary").size(18),
                Space::with_width(Length::Fill),
                stat("Total", summary.total.to_string(), MUTED),
            ],
            row![
                share_bar("Positive", distribution.positive_pct, POSITIVE),
                share_bar("Neutral", distribution.neutral_pct, NEUTRAL),
                share_bar("Negative", distribution.negative_pct, NEGATIVE),
            ]
            .spacing(8),
            text(format!("Avg score: {}", summary.average_score)).size(12),
            row![
                stat("Positive", summary.positive_count.to_string(), POSITIVE),
                stat("Neutral", summary.neutral_count.to_string(), NEUTRAL),
                stat("Negative", summary.negative_count.to_string(), NEGATIVE),
            ]
            .spacing(16),
        ]
        .spacing(10),
    )
}

fn metric(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "–".to_string())
}

fn record_row(record: &Record) -> Element<'_, Message, Theme> {
    let details = format!(
        "by {} • {} • likes {} • comments {} • shares {} • views {}",
        record.author,
        record.published_at.format("%Y-%m-%d %H:%M"),
        metric(record.metrics.likes),
        metric(record.metrics.comments),
        metric(record.metrics.shares),
        metric(record.metrics.views),
    );

    let mut body = column![
        row![
            text(record.source.key().to_uppercase()).size(11).style(MUTED),
            text(record.sentiment().as_str())
                .size(11)
                .style(sentiment_color(record.sentiment())),
        ]
        .spacing(8),
        text(&record.title).size(15),
        text(&record.snippet).size(12).style(MUTED),
        text(details).size(11).style(MUTED),
    ]
    .spacing(4)
    .width(Length::Fill);
    if record.has_link() {
        body = body.push(text(&record.url).size(11).style(MUTED));
    }

    let score = column![
        text(round_to_hundredths(record.score()).to_string()).size(14),
        text("sentiment score").size(10).style(MUTED),
    ];

    let card = container(row![body, score].spacing(12))
        .padding(12)
        .width(Length::Fill)
        .style(theme::Container::Box);

    if record.has_link() {
        mouse_area(card)
            .on_press(Message::OpenRecord(record.url.clone()))
            .into()
    } else {
        card.into()
    }
}

/// One platform's result list with its loading and empty states.
pub fn section_card<'a>(
    platform: Platform,
    count: Option<usize>,
    loading: bool,
    records: &'a [Record],
) -> Element<'a, Message, Theme> {
    let mut heading = row![text(platform.label()).size(18), Space::with_width(Length::Fill)];
    if let Some(count) = count {
        heading = heading.push(text(format!("{} items", count)).size(12).style(MUTED));
    }

    let body: Element<'a, Message, Theme> = if loading {
        text("Loading…").style(MUTED).into()
    } else if records.is_empty() {
        container(text(platform.empty_label()).style(MUTED))
            .padding(24)
            .width(Length::Fill)
            .center_x()
            .into()
    } else {
        Column::with_children(records.iter().map(record_row).collect::<Vec<_>>())
            .spacing(10)
            .into()
    };

    card(
        column![
            heading,
            text(platform.hint()).size(12).style(MUTED),
            body
        ]
        .spacing(8),
    )
}
