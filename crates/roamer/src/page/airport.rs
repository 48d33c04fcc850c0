//! Airport transfer booking

use super::{
    click_if_interactable, set_time, texts, type_and_pick, CalendarSelectors, PageObject, SessionCalendar,
    SuggestionField, TimePickerSelectors,
};
use crate::calendar::NavigationOutcome;
use crate::locator::Selector;
use crate::matcher::MatchOutcome;
use crate::result::RoamerResult;
use crate::session::{SessionContext, UiSession};
use crate::time_of_day::PickupTime;
use tracing::info;

/// Call-site name used for airport settings
pub const AIRPORT_CALL_SITE: &str = "airport";

/// Which leg of the transfer the airport is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferType {
    /// Pick up from the airport
    Pickup,
    /// Drop at the airport
    Drop,
}

/// Airport transfer booking page
#[derive(Debug)]
pub struct AirportTransferPage<'c, S> {
    ctx: &'c mut SessionContext<S>,
}

impl<'c, S: UiSession> AirportTransferPage<'c, S> {
    /// Bind the page to a session context
    pub fn new(ctx: &'c mut SessionContext<S>) -> Self {
        Self { ctx }
    }

    fn suggestion_items() -> Selector {
        Selector::xpath("//div[@class='auto_sugg_tttl']")
    }

    fn source_field() -> SuggestionField {
        SuggestionField {
            opener: Some(Selector::id("hrlysrc")),
            input: Selector::id("a_FromSector_show"),
            items: Self::suggestion_items(),
        }
    }

    fn destination_field() -> SuggestionField {
        SuggestionField {
            opener: Some(Selector::id("to")),
            input: Selector::id("a_ToSector_show"),
            items: Self::suggestion_items(),
        }
    }

    /// Date picker selectors
    #[must_use]
    pub fn calendar_selectors() -> CalendarSelectors {
        CalendarSelectors {
            label: vec![Selector::class_name("ui-datepicker-title")],
            next: Selector::xpath("//*[contains(@class,'next') and @title='Next']"),
            prev: None,
            days: Selector::xpath("//table[contains(@class,'calendar')]/tbody/tr/td/*"),
        }
    }

    /// Pickup time picker selectors
    #[must_use]
    pub fn time_picker() -> TimePickerSelectors {
        TimePickerSelectors {
            am: Selector::xpath("//label[@for='am']"),
            pm: Selector::xpath("//label[@for='pm']"),
            hours: Selector::xpath("//div[@id='hr']//ul//li"),
            minutes: Selector::xpath("//div[@id='min']//ul//li"),
            done: Selector::xpath("//div[@onclick='Done()']"),
        }
    }

    /// Whether the airport tab has rendered
    pub fn is_loaded(&mut self) -> RoamerResult<bool> {
        let marker = self.load_marker();
        Ok(!self.ctx.session().find_all(&marker)?.is_empty())
    }

    /// Open the airport transfer tab
    pub fn open(&mut self) -> RoamerResult<()> {
        self.ctx.session().click_on(&Selector::id("airportdiv"))
    }

    /// Choose pickup or drop
    pub fn choose_transfer(&mut self, transfer: TransferType) -> RoamerResult<()> {
        let selector = match transfer {
            TransferType::Pickup => Selector::id("pickup"),
            TransferType::Drop => Selector::id("drop"),
        };
        self.ctx.session().click_on(&selector)
    }

    /// Type the source and pick the closest suggestion
    pub fn select_source(&mut self, source: &str) -> RoamerResult<MatchOutcome> {
        type_and_pick(self.ctx, AIRPORT_CALL_SITE, &Self::source_field(), source)
    }

    /// Type the destination and pick the closest suggestion
    pub fn select_destination(&mut self, destination: &str) -> RoamerResult<MatchOutcome> {
        type_and_pick(self.ctx, AIRPORT_CALL_SITE, &Self::destination_field(), destination)
    }

    /// Open the date picker and select `date`
    pub fn select_date(&mut self, date: &str) -> RoamerResult<NavigationOutcome> {
        let navigator = self.ctx.navigator(AIRPORT_CALL_SITE);
        navigator.parse_target(date)?;
        let session = self.ctx.session();
        session.click_on(&Selector::xpath("//div[@id='pickCalender']//input[@id='datepicker']"))?;
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

    /// Run the search
    pub fn search(&mut self) -> RoamerResult<()> {
        self.ctx
            .session()
            .click_on(&Selector::xpath("//div[@id='CommonSearch']//div[text()='SEARCH']"))
    }

    /// Names of the listed cabs
    pub fn cab_names(&mut self) -> RoamerResult<Vec<String>> {
        texts(
            self.ctx.session(),
            &Selector::xpath("//div[@class='_listflx']//div[@class='list-dtl']/div[@class='_pro_ttl']"),
        )
    }

    /// Prices of the listed cabs, struck-through prices excluded
    pub fn cab_prices(&mut self) -> RoamerResult<Vec<String>> {
        texts(
            self.ctx.session(),
            &Selector::xpath("//div[@class='_listflx']//div[@class='nw_price']/div[not(contains(@class,'red'))]"),
        )
    }

    /// Filter the results to sedans
    pub fn filter_sedan(&mut self) -> RoamerResult<()> {
        click_if_interactable(
            self.ctx.session(),
            &Selector::xpath("//div[contains(@class,'chk-tcnt')]/span[text()=' sedan ']"),
        )
    }

    /// First listed price; results are listed cheapest first
    pub fn least_price(&mut self) -> RoamerResult<String> {
        let mut prices = texts(
            self.ctx.session(),
            &Selector::xpath("//div[@class='_listflx']//div[@class='nw_price']/div"),
        )?;
        Ok(prices.swap_remove(0))
    }
}

impl<S> PageObject for AirportTransferPage<'_, S> {
    fn url_pattern(&self) -> &str {
        "/cabs"
    }

    fn load_marker(&self) -> Selector {
        Selector::id("airportdiv")
    }

    fn page_name(&self) -> &str {
        "airport-transfer"
    }
}
