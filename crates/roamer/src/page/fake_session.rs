//! In-memory session shared by the page tests

use crate::clock::FakeClock;
use crate::locator::Selector;
use crate::result::{RoamerError, RoamerResult};
use crate::session::{ElementRef, SessionContext, UiSession};
use std::collections::HashMap;

/// Elements a click puts on screen: selector to `(id, text)` items
pub(crate) type Rerender = Vec<(Selector, Vec<(String, String)>)>;

/// Each selector maps to a list of element ids, each id to a text. Clicks
/// and typed keys are recorded.
#[derive(Debug, Default)]
pub(crate) struct FakeSession {
    pub elements: HashMap<Selector, Vec<String>>,
    pub texts: HashMap<String, String>,
    pub disabled: Vec<String>,
    pub stale_finds: HashMap<Selector, usize>,
    pub clicks: Vec<String>,
    pub keys: Vec<(String, String)>,
    pub on_click: HashMap<String, Rerender>,
}

impl FakeSession {
    pub fn put(&mut self, selector: Selector, items: &[(&str, &str)]) {
        self.elements
            .insert(selector, items.iter().map(|(id, _)| (*id).to_string()).collect());
        for (id, text) in items {
            self.texts.insert((*id).to_string(), (*text).to_string());
        }
    }

    pub fn put_owned(&mut self, selector: Selector, items: &[(String, String)]) {
        let borrowed: Vec<(&str, &str)> = items.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        self.put(selector, &borrowed);
    }

    pub fn button(&mut self, selector: Selector, id: &str) {
        self.put(selector, &[(id, "")]);
    }

    /// Suggestion items `sugg-0`, `sugg-1`, ... labelled in order
    pub fn suggestions(&mut self, selector: Selector, labels: &[&str]) {
        let items: Vec<(String, String)> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (format!("sugg-{i}"), (*l).to_string()))
            .collect();
        self.put_owned(selector, &items);
    }

    pub fn render(&mut self, page: Rerender) {
        for (selector, items) in page {
            self.put_owned(selector, &items);
        }
    }
}

impl UiSession for FakeSession {
    fn find_all(&mut self, selector: &Selector) -> RoamerResult<Vec<ElementRef>> {
        if let Some(n) = self.stale_finds.get_mut(selector) {
            if *n > 0 {
                *n -= 1;
                return Err(RoamerError::stale(selector.to_string()));
            }
        }
        Ok(self
            .elements
            .get(selector)
            .map(|ids| ids.iter().map(ElementRef::new).collect())
            .unwrap_or_default())
    }

    fn text(&mut self, element: &ElementRef) -> RoamerResult<String> {
        Ok(self.texts.get(&element.0).cloned().unwrap_or_default())
    }

    fn click(&mut self, element: &ElementRef) -> RoamerResult<()> {
        self.clicks.push(element.0.clone());
        if let Some(page) = self.on_click.get(&element.0).cloned() {
            self.render(page);
        }
        Ok(())
    }

    fn scroll_into_view(&mut self, _element: &ElementRef) -> RoamerResult<()> {
        Ok(())
    }

    fn is_interactable(&mut self, element: &ElementRef) -> RoamerResult<bool> {
        Ok(!self.disabled.contains(&element.0))
    }

    fn send_keys(&mut self, element: &ElementRef, keys: &str) -> RoamerResult<()> {
        self.keys.push((element.0.clone(), keys.to_string()));
        Ok(())
    }

    fn screenshot(&mut self) -> RoamerResult<Vec<u8>> {
        Ok(vec![0x89, b'P', b'N', b'G'])
    }
}

pub(crate) fn context(session: FakeSession) -> SessionContext<FakeSession> {
    SessionContext::new(session).with_clock(FakeClock::shared())
}

/// A calendar page: label parts, then day cells `1..=days` with ids
/// `<tag>-<day>`
pub(crate) fn month_page(label: &[(Selector, &str)], days: Selector, tag: &str, count: u32) -> Rerender {
    let mut page: Rerender = label
        .iter()
        .enumerate()
        .map(|(i, (selector, text))| (selector.clone(), vec![(format!("{tag}-label{i}"), (*text).to_string())]))
        .collect();
    page.push((days, (1..=count).map(|d| (format!("{tag}-{d}"), d.to_string())).collect()));
    page
}
