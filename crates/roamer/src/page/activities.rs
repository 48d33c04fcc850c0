//! Activities search

use super::{
    click_if_interactable, texts, type_and_pick, CalendarSelectors, PageObject, SessionCalendar, SuggestionField,
};
use crate::calendar::NavigationOutcome;
use crate::locator::Selector;
use crate::matcher::MatchOutcome;
use crate::result::{RoamerError, RoamerResult};
use crate::session::{SessionContext, UiSession};
use crate::store::TextLog;
use tracing::info;

/// Call-site name used for activities settings
pub const ACTIVITIES_CALL_SITE: &str = "activities";

/// Result names kept by [`ActivitiesPage::save_city_names`]
pub const ACTIVITY_RESULT_LIMIT: usize = 5;

const RESULTS_HEADER: &str = "Activities:\n-------------------------------------";

/// Activities search page
#[derive(Debug)]
pub struct ActivitiesPage<'c, S> {
    ctx: &'c mut SessionContext<S>,
}

impl<'c, S: UiSession> ActivitiesPage<'c, S> {
    /// Bind the page to a session context
    pub fn new(ctx: &'c mut SessionContext<S>) -> Self {
        Self { ctx }
    }

    fn city_field() -> SuggestionField {
        SuggestionField {
            opener: None,
            input: Selector::id("txtcityname"),
            items: Selector::xpath("//div[@id='autolist']/ul/li"),
        }
    }

    /// Date picker selectors; forward paging only
    #[must_use]
    pub fn calendar_selectors() -> CalendarSelectors {
        CalendarSelectors {
            label: vec![Selector::xpath("//li[@class='wt600']")],
            next: Selector::xpath("//li[@id='traveldatenextMonth']"),
            prev: None,
            days: Selector::xpath("//table//tbody//tr//td//span"),
        }
    }

    fn result_names() -> Selector {
        Selector::xpath("//div[@class='_cityname']")
    }

    /// Type part of a city name and pick the closest suggestion
    pub fn select_city(&mut self, partial: &str) -> RoamerResult<MatchOutcome> {
        type_and_pick(self.ctx, ACTIVITIES_CALL_SITE, &Self::city_field(), partial)
    }

    /// Open the travel date picker
    pub fn open_calendar(&mut self) -> RoamerResult<()> {
        self.ctx.session().click_on(&Selector::id("traveldateSec"))
    }

    /// Open the date picker, page to the month of `date` and click its day
    pub fn select_date(&mut self, date: &str) -> RoamerResult<NavigationOutcome> {
        let navigator = self.ctx.navigator(ACTIVITIES_CALL_SITE);
        navigator.parse_target(date)?;
        self.open_calendar()?;
        let mut calendar = SessionCalendar::new(self.ctx.session(), Self::calendar_selectors());
        navigator.navigate_to_date(date, &mut calendar)
    }

    /// Click a bare day number on the month the open picker is showing
    pub fn select_day(&mut self, day: &str) -> RoamerResult<usize> {
        let navigator = self.ctx.navigator(ACTIVITIES_CALL_SITE);
        let mut calendar = SessionCalendar::new(self.ctx.session(), Self::calendar_selectors());
        navigator.select_day(day, &mut calendar)
    }

    /// Run the search
    pub fn search(&mut self) -> RoamerResult<()> {
        self.ctx.session().click_on(&Selector::id("srchBtn"))
    }

    /// Sort results by price, low to high
    pub fn sort_price_low_to_high(&mut self) -> RoamerResult<()> {
        click_if_interactable(self.ctx.session(), &Selector::xpath("//li[@id='plh']"))
    }

    /// Tick the day-trips filter
    pub fn filter_day_trips(&mut self) -> RoamerResult<()> {
        let session = self.ctx.session();
        let container = session.find(&Selector::xpath("//div[@id='Day_Trips-chk']/.."))?;
        if !session.is_interactable(&container)? {
            return Err(RoamerError::ElementNotFound {
                selector: "day trips filter".into(),
            });
        }
        session.click_on(&Selector::xpath("//div[@id='Day_Trips-chk']//img[@class='tickImg']"))
    }

    /// Names of the listed activity cities
    pub fn city_names(&mut self) -> RoamerResult<Vec<String>> {
        texts(self.ctx.session(), &Self::result_names())
    }

    /// Rewrite `log` with a header and the first few result names
    pub fn save_city_names(&mut self, log: &TextLog) -> RoamerResult<Vec<String>> {
        let mut names = self.city_names()?;
        names.truncate(ACTIVITY_RESULT_LIMIT);
        log.clear()?;
        log.append(RESULTS_HEADER)?;
        for name in &names {
            log.append(name)?;
        }
        info!(path = %log.path().display(), count = names.len(), "activity results saved");
        Ok(names)
    }
}

impl<S> PageObject for ActivitiesPage<'_, S> {
    fn url_pattern(&self) -> &str {
        "/activities"
    }

    fn load_marker(&self) -> Selector {
        Selector::id("txtcityname")
    }

    fn page_name(&self) -> &str {
        "activities"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::super::fake_session::{context, month_page, FakeSession, Rerender};
    use super::*;

    type Page<'c> = ActivitiesPage<'c, FakeSession>;

    fn month(tag: &str, label: &str, days: u32) -> Rerender {
        let selectors = Page::calendar_selectors();
        month_page(&[(selectors.label[0].clone(), label)], selectors.days, tag, days)
    }

    fn calendar_session(start: Rerender) -> FakeSession {
        let mut session = FakeSession::default();
        session.button(Selector::id("traveldateSec"), "travel-date");
        session.button(Page::calendar_selectors().next, "next");
        session.render(start);
        session
    }

    mod search_tests {
        use super::*;

        #[test]
        fn test_partial_city_picks_shortest_fuzzy() {
            let mut session = FakeSession::default();
            session.button(Selector::id("txtcityname"), "city");
            session.suggestions(Page::city_field().items, &["Goa Velha", "North Goa", "Goa, India"]);
            let mut ctx = context(session);

            let outcome = ActivitiesPage::new(&mut ctx).select_city("goa").unwrap();
            assert_eq!(outcome.choice.label, "Goa Velha");
            let session = ctx.into_session();
            assert_eq!(session.keys, vec![("city".to_string(), "goa".to_string())]);
            assert_eq!(session.clicks, vec!["sugg-0"]);
        }

        #[test]
        fn test_sort_and_filter() {
            let mut session = FakeSession::default();
            session.button(Selector::xpath("//li[@id='plh']"), "plh");
            session.button(Selector::xpath("//div[@id='Day_Trips-chk']/.."), "day-trips-box");
            session.button(Selector::xpath("//div[@id='Day_Trips-chk']//img[@class='tickImg']"), "tick");
            let mut ctx = context(session);

            let mut page = ActivitiesPage::new(&mut ctx);
            page.sort_price_low_to_high().unwrap();
            page.filter_day_trips().unwrap();
            assert_eq!(ctx.into_session().clicks, vec!["plh", "tick"]);
        }

        #[test]
        fn test_hidden_day_trips_filter() {
            let mut session = FakeSession::default();
            session.button(Selector::xpath("//div[@id='Day_Trips-chk']/.."), "day-trips-box");
            session.disabled.push("day-trips-box".into());
            let mut ctx = context(session);
            assert!(matches!(
                ActivitiesPage::new(&mut ctx).filter_day_trips(),
                Err(RoamerError::ElementNotFound { .. })
            ));
        }
    }

    mod calendar_tests {
        use super::*;

        #[test]
        fn test_select_date_pages_forward() {
            let mut session = calendar_session(month("jun", "June 2025", 30));
            session.on_click.insert("next".into(), month("jul", "July 2025", 31));
            let mut ctx = context(session);

            let outcome = ActivitiesPage::new(&mut ctx).select_date("15/07/2025").unwrap();
            assert_eq!(outcome.page_turns, 1);
            assert_eq!(ctx.into_session().clicks, vec!["travel-date", "next", "jul-15"]);
        }

        #[test]
        fn test_bare_day_on_open_month() {
            let mut ctx = context(calendar_session(month("jul", "July 2025", 31)));
            let mut page = ActivitiesPage::new(&mut ctx);
            page.open_calendar().unwrap();
            assert_eq!(page.select_day("09").unwrap(), 8);
            assert!(matches!(page.select_day("32"), Err(RoamerError::InvalidDateFormat { .. })));
            assert_eq!(ctx.into_session().clicks, vec!["travel-date", "jul-9"]);
        }

        #[test]
        fn test_bare_day_missing_from_month() {
            let mut ctx = context(calendar_session(month("feb", "February 2026", 28)));
            let err = ActivitiesPage::new(&mut ctx).select_day("30").unwrap_err();
            assert!(matches!(err, RoamerError::DayNotFound { day: 30 }));
        }
    }

    mod results_tests {
        use super::*;

        #[test]
        fn test_save_first_five_names() {
            let mut session = FakeSession::default();
            let names: Vec<(String, String)> = (1..=7).map(|i| (format!("c{i}"), format!(" City {i} "))).collect();
            session.put_owned(Page::result_names(), &names);
            let mut ctx = context(session);
            let dir = tempfile::TempDir::new().unwrap();
            let log = TextLog::new(dir.path().join("ActivitiesResults.txt"));
            log.append("stale line").unwrap();

            let saved = ActivitiesPage::new(&mut ctx).save_city_names(&log).unwrap();
            assert_eq!(saved.len(), ACTIVITY_RESULT_LIMIT);
            let lines = log.lines().unwrap();
            assert_eq!(lines[0], "Activities:");
            assert_eq!(lines[2], "City 1");
            assert_eq!(lines.len(), 2 + ACTIVITY_RESULT_LIMIT);
        }

        #[test]
        fn test_no_results_is_error() {
            let mut ctx = context(FakeSession::default());
            let dir = tempfile::TempDir::new().unwrap();
            let log = TextLog::new(dir.path().join("ActivitiesResults.txt"));
            assert!(ActivitiesPage::new(&mut ctx).save_city_names(&log).is_err());
            assert!(log.lines().unwrap().is_empty());
        }
    }
}
