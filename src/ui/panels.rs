/// Which overlays are currently shown.
///
/// Any open drawer hides the bottom navigation; closing one shows it again.
/// Several drawers may be open at once, nothing prevents it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panels {
    pub bottom_nav: bool,
    pub event_drawer: bool,
    pub filter_drawer: bool,
    pub event_list: bool,
    pub map_search: bool,
    pub filter_button: bool,
    pub welcome: bool,
}

impl Default for Panels {
    fn default() -> Self {
        Self {
            bottom_nav: true,
            event_drawer: false,
            filter_drawer: false,
            event_list: false,
            map_search: false,
            filter_button: true,
            welcome: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drawer {
    Event,
    Filter,
    EventList,
}

impl Panels {
    fn slot(&mut self, drawer: Drawer) -> &mut bool {
        match drawer {
            Drawer::Event => &mut self.event_drawer,
            Drawer::Filter => &mut self.filter_drawer,
            Drawer::EventList => &mut self.event_list,
        }
    }

    pub fn is_open(&self, drawer: Drawer) -> bool {
        match drawer {
            Drawer::Event => self.event_drawer,
            Drawer::Filter => self.filter_drawer,
            Drawer::EventList => self.event_list,
        }
    }

    pub fn open(&mut self, drawer: Drawer) {
        *self.slot(drawer) = true;
        self.bottom_nav = false;
    }

    pub fn close(&mut self, drawer: Drawer) {
        *self.slot(drawer) = false;
        self.bottom_nav = true;
    }

    /// Returns whether the drawer is open afterwards
    pub fn toggle(&mut self, drawer: Drawer) -> bool {
        if self.is_open(drawer) {
            self.close(drawer);
            false
        } else {
            self.open(drawer);
            true
        }
    }

    /// Returns whether the search bar is visible afterwards
    pub fn toggle_map_search(&mut self) -> bool {
        self.map_search = !self.map_search;
        self.filter_button = !self.map_search;
        self.map_search
    }
}
