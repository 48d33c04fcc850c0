//! Hourly cab rental

use super::{
    click_if_interactable, click_option, set_time, texts, type_and_pick, CalendarSelectors, PageObject,
    SessionCalendar, SuggestionField, TimePickerSelectors,
};
use crate::calendar::NavigationOutcome;
use crate::locator::Selector;
use crate::matcher::MatchOutcome;
use crate::result::{RoamerError, RoamerResult};
use crate::session::{SessionContext, UiSession};
use crate::time_of_day::PickupTime;
use tracing::info;

/// Call-site name used for hourly rental settings
pub const HOURLY_CALL_SITE: &str = "hourly";

/// Hourly rental page. The city list only accepts an exact (case-insensitive)
/// name, and the date picker pages forward only.
#[derive(Debug)]
pub struct HourlyRentalPage<'c, S> {
    ctx: &'c mut SessionContext<S>,
}

impl<'c, S: UiSession> HourlyRentalPage<'c, S> {
    /// Bind the page to a session context
    pub fn new(ctx: &'c mut SessionContext<S>) -> Self {
        Self { ctx }
    }

    fn city_field() -> SuggestionField {
        SuggestionField {
            opener: Some(Selector::xpath("//div[@id='sourceName']")),
            input: Selector::xpath("//input[@id='a_FromSector_show']"),
            items: Selector::xpath("//div[@class='auto_sugg_tttl']"),
        }
    }

    /// Date picker selectors
    #[must_use]
    pub fn calendar_selectors() -> CalendarSelectors {
        CalendarSelectors {
            label: vec![
                Selector::xpath("//span[@class='ui-datepicker-month']"),
                Selector::xpath("//span[@class='ui-datepicker-year']"),
            ],
            next: Selector::xpath("//a[@data-handler='next']"),
            prev: None,
            days: Selector::xpath("//a[@class='ui-state-default']"),
        }
    }

    /// Pickup time picker selectors
    #[must_use]
    pub fn time_picker() -> TimePickerSelectors {
        TimePickerSelectors {
            am: Selector::xpath("//label[@for='am']"),
            pm: Selector::xpath("//label[@for='pm']"),
            hours: Selector::xpath("//div[@id='hr']/ul/li"),
            minutes: Selector::xpath("//div[@id='min']/ul/li"),
            done: Selector::xpath("//div[@class='done_d' and @onclick='Done()']"),
        }
    }

    fn rental_hours_items() -> Selector {
        Selector::xpath("//div[@id='addclsForRent']/ul/li")
    }

    /// Open the hourly rental tab
    pub fn open(&mut self) -> RoamerResult<()> {
        self.ctx.session().click_on(&Selector::id("li3"))
    }

    /// Type the city and pick the suggestion with exactly that name
    pub fn select_city(&mut self, city: &str) -> RoamerResult<MatchOutcome> {
        type_and_pick(self.ctx, HOURLY_CALL_SITE, &Self::city_field(), city)
    }

    /// Open the date picker and select `date`
    pub fn select_date(&mut self, date: &str) -> RoamerResult<NavigationOutcome> {
        let navigator = self.ctx.navigator(HOURLY_CALL_SITE);
        navigator.parse_target(date)?;
        let session = self.ctx.session();
        session.click_on(&Selector::xpath("//div[@class='box-dt']"))?;
        let mut calendar = SessionCalendar::new(session, Self::calendar_selectors());
        navigator.navigate_to_date(date, &mut calendar)
    }

    /// Set the pickup time from `"HH:mm AM|PM"`
    pub fn select_time(&mut self, time: &str) -> RoamerResult<PickupTime> {
        let pickup = PickupTime::parse(time)?;
        set_time(self.ctx.session(), &Self::time_picker(), &pickup)?;
        info!(time = %pickup, "pickup time set");
        Ok(pickup)
    }

    /// Choose the rental package whose label starts with `hours`
    /// (`"4"` picks `"4 hrs 40 kms"`)
    pub fn select_rental_hours(&mut self, hours: &str) -> RoamerResult<()> {
        let wanted = hours.trim();
        if wanted.is_empty() {
            return Err(RoamerError::ElementNotFound {
                selector: Self::rental_hours_items().to_string(),
            });
        }
        let session = self.ctx.session();
        session.click_on(&Selector::xpath("//div[@id='rtimes']/parent::div[@id='timePicker']"))?;
        click_option(session, &Self::rental_hours_items(), |text| {
            text.split_whitespace().next() == Some(wanted)
        })?;
        info!(hours = wanted, "rental package set");
        Ok(())
    }

    /// Run the search
    pub fn search(&mut self) -> RoamerResult<()> {
        self.ctx.session().click_on(&Selector::xpath("//div[@onclick='GetList()']"))
    }

    /// Filter the results to SUVs
    pub fn filter_suv(&mut self) -> RoamerResult<()> {
        click_if_interactable(
            self.ctx.session(),
            &Selector::xpath("//div[contains(@class,'chk-tcnt')]/span[text()=' suv ']"),
        )
    }

    /// Lowest fare shown for the current filter
    pub fn least_fare(&mut self) -> RoamerResult<String> {
        let mut fares = texts(self.ctx.session(), &Selector::xpath("//div[@class='cabFare _f25 ']"))?;
        Ok(fares.swap_remove(0))
    }
}

impl<S> PageObject for HourlyRentalPage<'_, S> {
    fn url_pattern(&self) -> &str {
        "/cabs/hourly"
    }

    fn load_marker(&self) -> Selector {
        Selector::id("li3")
    }

    fn page_name(&self) -> &str {
        "hourly-rental"
    }
}
