//! Named-destination stack navigation shared by every screen.

/// Parameters for the theme/uniform drill-down view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDetailsParams {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Home,
    Explore,
    Events,
    BookEventFlow,
    ThemeDetails(ThemeDetailsParams),
}

impl Destination {
    pub fn name(&self) -> &'static str {
        match self {
            Destination::Home => "Home",
            Destination::Explore => "Explore",
            Destination::Events => "Events",
            Destination::BookEventFlow => "BookEventFlow",
            Destination::ThemeDetails(_) => "ThemeDetails",
        }
    }
}

pub trait Router {
    fn navigate(&mut self, dest: Destination);
    fn go_back(&mut self);
    fn pop_to_top(&mut self);
    fn replace(&mut self, dest: Destination);
}

/// Stack of destinations with `Home` at the root.
#[derive(Debug)]
pub struct StackRouter {
    stack: Vec<Destination>,
}

impl Default for StackRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl StackRouter {
    pub fn new() -> Self {
        Self {
            stack: vec![Destination::Home],
        }
    }

    pub fn current(&self) -> &Destination {
        // The root is never popped, so the stack is never empty.
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.stack.iter().any(|d| d.name() == name)
    }
}

impl Router for StackRouter {
    fn navigate(&mut self, dest: Destination) {
        if let Some(pos) = self.stack.iter().position(|d| d.name() == dest.name()) {
            self.stack.truncate(pos + 1);
            self.stack[pos] = dest;
        } else {
            self.stack.push(dest);
        }
        tracing::debug!(to = self.current().name(), depth = self.stack.len(), "navigate");
    }

    fn go_back(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        tracing::debug!(to = self.current().name(), depth = self.stack.len(), "go back");
    }

    fn pop_to_top(&mut self) {
        self.stack.truncate(1);
        tracing::debug!("pop to top");
    }

    fn replace(&mut self, dest: Destination) {
        let top = self.stack.len() - 1;
        self.stack[top] = dest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(id: &str) -> Destination {
        Destination::ThemeDetails(ThemeDetailsParams {
            id: id.into(),
            title: "Corporate Gala".into(),
            description: String::new(),
            image: String::new(),
            color: "#305B77".into(),
        })
    }

    #[test]
    fn starts_at_home() {
        let router = StackRouter::new();
        assert_eq!(router.current(), &Destination::Home);
        assert_eq!(router.depth(), 1);
    }

    #[test]
    fn go_back_never_pops_root() {
        let mut router = StackRouter::new();
        router.go_back();
        assert_eq!(router.depth(), 1);
        assert_eq!(router.current(), &Destination::Home);
    }

    #[test]
    fn navigate_pushes_new_destinations() {
        let mut router = StackRouter::new();
        router.navigate(Destination::BookEventFlow);
        router.navigate(details("3"));
        assert_eq!(router.depth(), 3);
        assert!(router.contains("BookEventFlow"));
        router.go_back();
        assert_eq!(router.current(), &Destination::BookEventFlow);
    }

    #[test]
    fn navigate_to_existing_name_unwinds() {
        let mut router = StackRouter::new();
        router.navigate(Destination::Explore);
        router.navigate(details("1"));
        router.navigate(Destination::Explore);
        assert_eq!(router.depth(), 2);
        assert_eq!(router.current(), &Destination::Explore);
    }

    #[test]
    fn pop_to_top_then_home_lands_on_root() {
        let mut router = StackRouter::new();
        router.navigate(Destination::BookEventFlow);
        router.navigate(details("2"));
        router.pop_to_top();
        router.navigate(Destination::Home);
        assert_eq!(router.depth(), 1);
        assert_eq!(router.current(), &Destination::Home);
        assert!(!router.contains("BookEventFlow"));
    }

    #[test]
    fn replace_swaps_top_entry() {
        let mut router = StackRouter::new();
        router.navigate(Destination::Explore);
        router.replace(Destination::BookEventFlow);
        assert_eq!(router.depth(), 2);
        assert_eq!(router.current(), &Destination::BookEventFlow);
        assert!(!router.contains("Explore"));
    }
}
