mod links;
mod widgets;

pub use links::{LinkOpener, SystemBrowser};

use chrono::NaiveDate;
use iced::widget::{
    button, column, container, pick_list, row, scrollable, text, text_input, Column, Row, Space,
};
use iced::{theme, Alignment, Command, Element, Length, Theme};
use reputation_core::{
    execute, is_openable_url, write_export, AppConfig, Catalog, CoreError, DataSource, ErrorExt, ErrorReporter,
    Language, Platform, SearchController, SearchOutcome, SearchStatus, TimeRange,
    DEFAULT_EXPORT_FILENAME,
};
use saved_searches::SavedSearchStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub enum Message {
    QueryChanged(String),
    SearchRequested,
    SearchCompleted(SearchOutcome),
    RangeSelected(TimeRange),
    LanguageSelected(Language),
    CustomFromChanged(String),
    CustomToChanged(String),
    PlatformToggled(Platform),
    SaveSearch,
    LoadSavedSearch(usize),
    ExportCsv,
    OpenRecord(String),
}

/// Everything the view needs from the outside world, built once in `main`.
pub struct AppContext {
    pub config: AppConfig,
    pub catalog: Catalog,
    pub source: Arc<dyn DataSource>,
    pub saved: SavedSearchStore,
    pub opener: Arc<dyn LinkOpener>,
}

pub struct App {
    catalog: Catalog,
    source: Arc<dyn DataSource>,
    saved: SavedSearchStore,
    opener: Arc<dyn LinkOpener>,
    controller: SearchController,
    export_dir: PathBuf,
    custom_from_input: String,
    custom_to_input: String,
    notice: Option<String>,
    reporter: ErrorReporter,
}

impl App {
    pub fn new(context: AppContext) -> (Self, Command<Message>) {
        let AppContext {
            config,
            catalog,
            source,
            saved,
            opener,
        } = context;

        let mut app = Self {
            catalog,
            source,
            saved,
            opener,
            controller: SearchController::new(config.initial_search()),
            export_dir: config.export.directory.clone(),
            custom_from_input: String::new(),
            custom_to_input: String::new(),
            notice: None,
            reporter: ErrorReporter::new(),
        };

        let command = if config.search.search_on_startup {
            app.start_search()
        } else {
            Command::none()
        };
        (app, command)
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn saved(&self) -> &SavedSearchStore {
        &self.saved
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn start_search(&mut self) -> Command<Message> {
        match self.controller.begin_search() {
            Some(request) => Command::perform(
                execute(self.source.clone(), request),
                Message::SearchCompleted,
            ),
            None => Command::none(),
        }
    }

    fn report(&mut self, error: CoreError) {
        self.reporter.report_error(&error);
        self.notice = Some(error.user_friendly_message());
    }

    pub fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::QueryChanged(query) => {
                self.controller.set_query(query);
                Command::none()
            }
            Message::SearchRequested => self.start_search(),
            Message::SearchCompleted(outcome) => {
                self.controller.complete(outcome);
                Command::none()
            }
            Message::RangeSelected(range) => {
                self.controller.set_range(range);
                Command::none()
            }
            Message::LanguageSelected(language) => {
                self.controller.set_language(language);
                Command::none()
            }
            Message::CustomFromChanged(value) => {
                self.controller.set_custom_from(parse_date(&value));
                self.custom_from_input = value;
                Command::none()
            }
            Message::CustomToChanged(value) => {
                self.controller.set_custom_to(parse_date(&value));
                self.custom_to_input = value;
                Command::none()
            }
            Message::PlatformToggled(platform) => {
                self.controller.toggle_platform(platform);
                Command::none()
            }
            Message::SaveSearch => {
                if self.controller.config().trimmed_query().is_none() {
                    debug!("Not saving a search without a query");
                    return Command::none();
                }
                let config = self.controller.config().clone();
                let saved = self.saved.save(config).map(|entry| entry.config.query.clone());
                match saved {
                    Ok(query) => self.notice = Some(format!("Saved \"{}\"", query)),
                    Err(e) => self.report(e.into()),
                }
                Command::none()
            }
            Message::LoadSavedSearch(index) => {
                if let Some(entry) = self.saved.get(index) {
                    self.controller.apply_saved(entry);
                    self.custom_from_input = format_date(entry.config.custom_from);
                    self.custom_to_input = format_date(entry.config.custom_to);
                }
                Command::none()
            }
            Message::ExportCsv => {
                let records = self.controller.records();
                info!("Exporting {} records", records.len());
                match write_export(&self.export_dir, DEFAULT_EXPORT_FILENAME, records) {
                    Ok(path) => self.notice = Some(format!("Exported to {}", path.display())),
                    Err(e) => self.report(e),
                }
                Command::none()
            }
            Message::OpenRecord(url) => {
                if !is_openable_url(&url) {
                    debug!("Record has no source link to open");
                    return Command::none();
                }
                if let Err(source) = self.opener.open(&url) {
                    self.report(CoreError::OpenLink { url, source });
                }
                Command::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message, Theme> {
        let content = column![
            self.header(),
            self.controls(),
            self.saved_searches(),
            self.overview(),
            self.sections(),
        ]
        .spacing(20);

        container(scrollable(content.padding(20)))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn header(&self) -> Element<'_, Message, Theme> {
        let mut title = column![
            text("ReputationFix").size(24),
            text("Online Reputation Monitoring").size(12),
        ];
        if let Some(notice) = &self.notice {
            title = title.push(text(notice).size(12));
        }

        row![
            title,
            Space::with_width(Length::Fill),
            button("Save search")
                .on_press(Message::SaveSearch)
                .style(theme::Button::Secondary),
            button("Export CSV")
                .on_press(Message::ExportCsv)
                .style(theme::Button::Primary),
        ]
        .spacing(10)
        .align_items(Alignment::Center)
        .into()
    }

    fn controls(&self) -> Element<'_, Message, Theme> {
        let config = self.controller.config();

        let query = column![
            text("Query / Brand / Keyword").size(12),
            row![
                text_input("Brand, product or keyword", &config.query)
                    .on_input(Message::QueryChanged)
                    .on_submit(Message::SearchRequested)
                    .padding(10),
                button("Search")
                    .on_press(Message::SearchRequested)
                    .padding(10),
            ]
        ]
        .spacing(4)
        .width(Length::FillPortion(2));

        let mut range = column![
            text("Time range").size(12),
            pick_list(
                &self.catalog.time_ranges[..],
                Some(config.range),
                Message::RangeSelected
            ),
        ]
        .spacing(4)
        .width(Length::FillPortion(1));
        if config.range == TimeRange::Custom {
            range = range.push(
                row![
                    text_input("From (YYYY-MM-DD)", &self.custom_from_input)
                        .on_input(Message::CustomFromChanged),
                    text_input("To (YYYY-MM-DD)", &self.custom_to_input)
                        .on_input(Message::CustomToChanged),
                ]
                .spacing(6),
            );
        }

        let language = column![
            text("Language").size(12),
            pick_list(
                &self.catalog.languages[..],
                Some(config.language),
                Message::LanguageSelected
            ),
        ]
        .spacing(4)
        .width(Length::FillPortion(1));

        let chips: Vec<Element<'_, Message, Theme>> = self
            .catalog
            .platforms
            .iter()
            .map(|&platform| {
                let style = if config.platforms.contains(&platform) {
                    theme::Button::Primary
                } else {
                    theme::Button::Secondary
                };
                button(text(platform.label()).size(14))
                    .on_press(Message::PlatformToggled(platform))
                    .style(style)
                    .into()
            })
            .collect();
        let chips = Row::with_children(chips).spacing(8);

        column![row![query, range, language].spacing(16), chips]
            .spacing(12)
            .into()
    }

    fn saved_searches(&self) -> Element<'_, Message, Theme> {
        if self.saved.is_empty() {
            return Space::with_height(Length::Fixed(0.0)).into();
        }

        let mut chips = Row::new()
            .spacing(6)
            .align_items(Alignment::Center)
            .push(text("Saved:").size(12));
        for (index, entry) in self.saved.entries().iter().enumerate() {
            chips = chips.push(
                button(text(entry.label()).size(12))
                    .on_press(Message::LoadSavedSearch(index))
                    .style(theme::Button::Secondary),
            );
        }

        scrollable(chips)
            .direction(scrollable::Direction::Horizontal(
                scrollable::Properties::default(),
            ))
            .into()
    }

    fn overview(&self) -> Element<'_, Message, Theme> {
        let summary = self.controller.summary();

        let status: Element<'_, Message, Theme> = match self.controller.status() {
            SearchStatus::Loading => text("Fetching sources…").into(),
            SearchStatus::Error(message) => text(message).style(widgets::NEGATIVE).into(),
            SearchStatus::Idle | SearchStatus::Ready => {
                text("Ready").style(widgets::POSITIVE).into()
            }
        };

        let status_card = widgets::card(
            column![
                text("Status").size(18),
                status,
                button("Run Search")
                    .on_press(Message::SearchRequested)
                    .width(Length::Fill),
            ]
            .spacing(10),
        );

        let actions = widgets::card(
            column![
                text("Actions").size(18),
                text("• Toggle platforms above to focus your crawl.").size(13),
                text("• Use Export CSV for offline analysis.").size(13),
                text("• Save a search to reuse settings.").size(13),
                text("• Click any card to open the source.").size(13),
            ]
            .spacing(6),
        );

        row![
            container(widgets::summary_card(summary)).width(Length::FillPortion(2)),
            container(actions).width(Length::FillPortion(1)),
            container(status_card).width(Length::FillPortion(1)),
        ]
        .spacing(16)
        .into()
    }

    fn sections(&self) -> Element<'_, Message, Theme> {
        let loading = self.controller.is_loading();
        let cards: Vec<Element<'_, Message, Theme>> = self
            .catalog
            .platforms
            .iter()
            .map(|&platform| {
                let count = self
                    .controller
                    .results()
                    .get(&platform)
                    .map(|records| records.len());
                widgets::section_card(
                    platform,
                    count,
                    loading,
                    self.controller.records_for(platform),
                )
            })
            .collect();

        Column::with_children(cards).spacing(16).into()
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
