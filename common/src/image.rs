//! Transient image selection for the profile photo preview.
//!
//! The selection owns both the picked file and the preview handle derived
//! from it. Handles are released through `Drop`: replacing the selection,
//! clearing it, or dropping the whole selection (component unmount) drops the
//! previous handle. In the browser the handle is `gloo_file::ObjectUrl`,
//! which revokes its object URL when dropped.

/// Shown file names longer than this are cut and get a trailing `...`.
pub const DISPLAY_NAME_LIMIT: usize = 20;

/// Truncates a file name for the caption under the preview.
pub fn display_name(name: &str) -> String {
    match name.char_indices().nth(DISPLAY_NAME_LIMIT) {
        Some((cut, _)) => format!("{}...", &name[..cut]),
        None => name.to_string(),
    }
}

#[derive(Debug)]
struct Selected<F, H> {
    file: F,
    name: String,
    preview: H,
}

/// At most one selected image together with its preview handle.
#[derive(Debug)]
pub struct ImageSelection<F, H> {
    current: Option<Selected<F, H>>,
}

impl<F, H> Default for ImageSelection<F, H> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<F, H> ImageSelection<F, H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any existing selection. `acquire` derives the preview handle;
    /// the previous handle is dropped once the new one exists.
    pub fn select(&mut self, file: F, name: impl Into<String>, acquire: impl FnOnce(&F) -> H) {
        let preview = acquire(&file);
        self.current = Some(Selected {
            file,
            name: name.into(),
            preview,
        });
    }

    /// Drops the selection and its handle. Returns whether there was one.
    pub fn clear(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn file(&self) -> Option<&F> {
        self.current.as_ref().map(|s| &s.file)
    }

    pub fn preview(&self) -> Option<&H> {
        self.current.as_ref().map(|s| &s.preview)
    }

    pub fn name(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.name.as_str())
    }

    pub fn display_name(&self) -> Option<String> {
        self.name().map(display_name)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Preview handle that records its release.
    struct Handle {
        url: String,
        released: Rc<RefCell<Vec<String>>>,
    }

    impl Drop for Handle {
        fn drop(&mut self) {
            self.released.borrow_mut().push(self.url.clone());
        }
    }

    fn acquire(released: &Rc<RefCell<Vec<String>>>) -> impl FnOnce(&&str) -> Handle {
        let released = released.clone();
        move |file: &&str| Handle {
            url: format!("blob:{file}"),
            released,
        }
    }

    #[test]
    fn short_names_are_kept() {
        assert_eq!(display_name("me.png"), "me.png");
        assert_eq!(display_name("exactly-twenty-chars"), "exactly-twenty-chars");
    }

    #[test]
    fn long_names_are_truncated_with_ellipsis() {
        assert_eq!(
            display_name("a-very-long-profile-photo-name.jpeg"),
            "a-very-long-profile-..."
        );
        assert_eq!(display_name("ééééééééééééééééééééé.png"), "éééééééééééééééééééé...");
    }

    #[test]
    fn select_then_clear_releases_handle() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let mut selection = ImageSelection::new();

        selection.select("one.png", "one.png", acquire(&released));
        assert_eq!(selection.preview().map(|h| h.url.as_str()), Some("blob:one.png"));
        assert!(released.borrow().is_empty());

        assert!(selection.clear());
        assert!(selection.is_empty());
        assert_eq!(*released.borrow(), vec!["blob:one.png".to_string()]);
        assert!(!selection.clear());
    }

    #[test]
    fn second_select_replaces_first() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let mut selection = ImageSelection::new();

        selection.select("one.png", "one.png", acquire(&released));
        selection.select("two.png", "two.png", acquire(&released));

        assert_eq!(selection.file(), Some(&"two.png"));
        assert_eq!(selection.name(), Some("two.png"));
        assert_eq!(*released.borrow(), vec!["blob:one.png".to_string()]);
    }

    #[test]
    fn dropping_the_selection_releases_handle() {
        let released = Rc::new(RefCell::new(Vec::new()));
        {
            let mut selection = ImageSelection::new();
            selection.select("one.png", "one.png", acquire(&released));
        }
        assert_eq!(*released.borrow(), vec!["blob:one.png".to_string()]);
    }
}
