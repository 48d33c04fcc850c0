//! Outstation cab booking
//!
//! The only booking page whose date picker pages backwards as well as
//! forwards. Pickup and return dates share one picker; the return time has
//! its own hour and minute lists.

use super::{
    click_if_interactable, set_time, texts, type_and_pick, CalendarSelectors, PageObject, SessionCalendar,
    SuggestionField, TimePickerSelectors,
};
use crate::calendar::NavigationOutcome;
use crate::locator::Selector;
use crate::matcher::MatchOutcome;
use crate::result::{RoamerError, RoamerResult};
use crate::session::{SessionContext, UiSession};
use crate::store::JsonStore;
use crate::time_of_day::PickupTime;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Call-site name used for outstation settings
pub const OUTSTATION_CALL_SITE: &str = "outstation";

/// One vehicle row of the fare list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CabFare {
    /// Vehicle name
    pub vehicle: String,
    /// Price as displayed
    pub price: String,
}

/// Outstation cab booking page
#[derive(Debug)]
pub struct OutstationPage<'c, S> {
    ctx: &'c mut SessionContext<S>,
}

impl<'c, S: UiSession> OutstationPage<'c, S> {
    /// Bind the page to a session context
    pub fn new(ctx: &'c mut SessionContext<S>) -> Self {
        Self { ctx }
    }

    fn source_field() -> SuggestionField {
        SuggestionField {
            opener: Some(Selector::id("sourceName")),
            input: Selector::id("a_FromSector_show"),
            items: Selector::xpath("//div[@id='StartCity']//ul//li"),
        }
    }

    fn destination_field() -> SuggestionField {
        SuggestionField {
            opener: Some(Selector::id("destinationName")),
            input: Selector::id("a_ToSector_show"),
            items: Selector::xpath("//div[@id='EndCity']//ul//li"),
        }
    }

    /// Date picker selectors, with a previous-month control
    #[must_use]
    pub fn calendar_selectors() -> CalendarSelectors {
        CalendarSelectors {
            label: vec![
                Selector::xpath("//span[@class='ui-datepicker-month']"),
                Selector::xpath("//span[@class='ui-datepicker-year']"),
            ],
            next: Selector::xpath("//span[@class='ui-icon ui-icon-circle-triangle-e']"),
            prev: Some(Selector::xpath("//span[@class='ui-icon ui-icon-circle-triangle-w']")),
            days: Selector::xpath("//table[contains(@class,'ui-datepicker-calendar')]//td/a"),
        }
    }

    /// Pickup time picker selectors
    #[must_use]
    pub fn pickup_time_picker() -> TimePickerSelectors {
        TimePickerSelectors {
            am: Selector::xpath("//label[@for='am']"),
            pm: Selector::xpath("//label[@for='pm']"),
            hours: Selector::xpath("//div[@id='hr']//ul//li"),
            minutes: Selector::xpath("//div[@id='min']//ul//li"),
            done: Selector::xpath("//div[@onclick='Done()']"),
        }
    }

    /// Return time picker selectors
    #[must_use]
    pub fn return_time_picker() -> TimePickerSelectors {
        TimePickerSelectors {
            am: Selector::xpath("//div[@id='rap']//label[@for='ram']"),
            pm: Selector::xpath("//div[@id='rap']//label[@for='rpm']"),
            hours: Selector::xpath("//div[@id='rhr']//ul//li"),
            minutes: Selector::xpath("//div[@id='rmin']//ul//li"),
            done: Selector::xpath("//div[@onclick='rDone()']"),
        }
    }

    fn return_toggle() -> Selector {
        Selector::id("rtag")
    }

    /// Open the outstation tab
    pub fn open(&mut self) -> RoamerResult<()> {
        self.ctx.session().click_on(&Selector::id("li2"))
    }

    /// Type the source city and pick the closest suggestion
    pub fn select_source(&mut self, city: &str) -> RoamerResult<MatchOutcome> {
        type_and_pick(self.ctx, OUTSTATION_CALL_SITE, &Self::source_field(), city)
    }

    /// Type the destination city and pick the closest suggestion
    pub fn select_destination(&mut self, city: &str) -> RoamerResult<MatchOutcome> {
        type_and_pick(self.ctx, OUTSTATION_CALL_SITE, &Self::destination_field(), city)
    }

    fn pick_date(&mut self, openers: &[Selector], date: &str) -> RoamerResult<NavigationOutcome> {
        let navigator = self.ctx.navigator(OUTSTATION_CALL_SITE);
        navigator.parse_target(date)?;
        let session = self.ctx.session();
        for opener in openers {
            session.click_on(opener)?;
        }
        let mut calendar = SessionCalendar::new(session, Self::calendar_selectors());
        navigator.navigate_to_date(date, &mut calendar)
    }

    /// Open the pickup date picker and select `date`
    pub fn select_pickup_date(&mut self, date: &str) -> RoamerResult<NavigationOutcome> {
        self.pick_date(&[Selector::id("datepicker")], date)
    }

    /// Switch to a round trip and select the return `date`
    pub fn select_return_date(&mut self, date: &str) -> RoamerResult<NavigationOutcome> {
        self.pick_date(&[Self::return_toggle(), Selector::id("rdatepicker")], date)
    }

    /// Set the pickup time from `"HH:mm AM|PM"`
    pub fn select_pickup_time(&mut self, time: &str) -> RoamerResult<PickupTime> {
        let pickup = PickupTime::parse(time)?;
        set_time(self.ctx.session(), &Self::pickup_time_picker(), &pickup)?;
        info!(time = %pickup, "pickup time set");
        Ok(pickup)
    }

    /// Open the return time picker and set it from `"HH:mm AM|PM"`
    pub fn select_return_time(&mut self, time: &str) -> RoamerResult<PickupTime> {
        let back = PickupTime::parse(time)?;
        let session = self.ctx.session();
        session.click_on(&Self::return_toggle())?;
        set_time(session, &Self::return_time_picker(), &back)?;
        info!(time = %back, "return time set");
        Ok(back)
    }

    /// Run the search
    pub fn search(&mut self) -> RoamerResult<()> {
        self.ctx.session().click_on(&Selector::xpath("//div[@onclick='GetList()']"))
    }

    /// Filter to SUVs, expand the fare options and read every vehicle row.
    ///
    /// The options pane is closed again afterwards. Rows whose name and price
    /// lists disagree in length are an error rather than being paired up.
    pub fn suv_fares(&mut self) -> RoamerResult<Vec<CabFare>> {
        let session = self.ctx.session();
        click_if_interactable(session, &Selector::xpath("//label[3]//div[1]//span[2]"))?;
        click_if_interactable(session, &Selector::xpath("//div[@class='blue-link']//a"))?;

        let vehicles = texts(
            session,
            &Selector::xpath("//label[contains(@class,'fare')]//div[contains(@class,'checkbox-container')]/h6"),
        )?;
        let prices = texts(
            session,
            &Selector::xpath("//label[contains(@class,'fare')]//div[contains(@class,'ruppes')]//h6"),
        )?;
        if vehicles.len() != prices.len() {
            warn!(vehicles = vehicles.len(), prices = prices.len(), "fare rows incomplete");
            return Err(RoamerError::ElementNotFound {
                selector: "vehicle fare rows".into(),
            });
        }

        session.click_on(&Selector::xpath("//span[@class='close']"))?;
        Ok(vehicles
            .into_iter()
            .zip(prices)
            .map(|(vehicle, price)| CabFare { vehicle, price })
            .collect())
    }

    /// Record `fares` under `scenario`, one key per vehicle
    pub fn save_fares(store: &JsonStore, scenario: &str, fares: &[CabFare]) -> RoamerResult<()> {
        for fare in fares {
            store.write_scenario_value(scenario, &fare.vehicle, &fare.price)?;
        }
        Ok(())
    }
}

impl<S> PageObject for OutstationPage<'_, S> {
    fn url_pattern(&self) -> &str {
        "/cabs/outstation"
    }

    fn load_marker(&self) -> Selector {
        Selector::id("li2")
    }

    fn page_name(&self) -> &str {
        "outstation"
    }
}
