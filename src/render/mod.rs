//! Interactive rendering for pages whose tables live behind tab widgets.
//!
//! The extraction core only talks to the [`Renderer`] trait, so scanners can
//! be exercised against static markup while the `browser` feature supplies a
//! headless Chrome implementation.

#[cfg(feature = "browser")]
pub mod chrome;

#[cfg(feature = "browser")]
pub use chrome::{ChromeConfig, ChromeRenderer};

use crate::error::Result;

/// One clickable tab control found on the rendered page.
///
/// Controls are addressed by the selector that found them plus their
/// position among its matches, which stays valid across clicks as long as
/// the widget does not rebuild its tab strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabControl {
    pub selector: String,
    pub index: usize,
    /// Visible text of the control at discovery time.
    pub text: String,
}

/// Browser-like capability that can load a page and click elements on it.
pub trait Renderer {
    /// Load `url` and wait for the page to finish loading.
    fn open(&mut self, url: &str) -> Result<()>;

    /// Every element matching `selector` on the current page, in DOM order.
    fn find(&mut self, selector: &str) -> Result<Vec<TabControl>>;

    /// Activate a control previously returned by [`Renderer::find`].
    fn click(&mut self, control: &TabControl) -> Result<()>;

    /// Serialized markup of the page as currently rendered.
    fn current_markup(&mut self) -> Result<String>;

    /// Release the underlying session. Further calls may fail.
    fn close(&mut self);
}

/// Owns a renderer for the duration of a run and closes it on drop, so the
/// session is released on every exit path.
pub struct RendererSession {
    inner: Box<dyn Renderer>,
    closed: bool,
}

impl RendererSession {
    #[must_use]
    pub fn new(inner: Box<dyn Renderer>) -> Self {
        Self {
            inner,
            closed: false,
        }
    }

    pub fn renderer(&mut self) -> &mut dyn Renderer {
        self.inner.as_mut()
    }

    pub fn close(&mut self) {
        if !self.closed {
            self.inner.close();
            self.closed = true;
        }
    }
}

impl Drop for RendererSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingRenderer {
        closes: Rc<Cell<usize>>,
    }

    impl Renderer for CountingRenderer {
        fn open(&mut self, _url: &str) -> Result<()> {
            Ok(())
        }
        fn find(&mut self, _selector: &str) -> Result<Vec<TabControl>> {
            Ok(Vec::new())
        }
        fn click(&mut self, _control: &TabControl) -> Result<()> {
            Ok(())
        }
        fn current_markup(&mut self) -> Result<String> {
            Ok(String::new())
        }
        fn close(&mut self) {
            self.closes.set(self.closes.get() + 1);
        }
    }

    #[test]
    fn session_closes_once_on_drop() {
        let closes = Rc::new(Cell::new(0));
        {
            let _session = RendererSession::new(Box::new(CountingRenderer {
                closes: Rc::clone(&closes),
            }));
        }
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn explicit_close_is_not_repeated_by_drop() {
        let closes = Rc::new(Cell::new(0));
        let mut session = RendererSession::new(Box::new(CountingRenderer {
            closes: Rc::clone(&closes),
        }));
        session.close();
        drop(session);
        assert_eq!(closes.get(), 1);
    }
}
