use arc_swap::ArcSwap;
use std::sync::{Arc, OnceLock};

/// Process-wide state that is set once and read-only afterwards.
pub trait StaticState<S: 'static> {
    fn get_static() -> &'static OnceLock<S>;

    /// Sets the state if it has not been set yet. Returns the rejected value otherwise.
    fn set_state(state: S) -> Result<&'static S, S> {
        let static_ref = Self::get_static();
        static_ref.set(state)?;
        Ok(static_ref
            .get()
            .expect("static state was set by the previous statement"))
    }

    fn try_state() -> Option<&'static S> {
        Self::get_static().get()
    }
}

/// Process-wide state that can be atomically replaced; readers get an `Arc` snapshot.
pub trait StaticStateMut<S: 'static> {
    fn get_static() -> &'static OnceLock<ArcSwap<S>>;

    fn get_or_init_state(f: impl FnOnce() -> S) -> Arc<S> {
        let static_ref = Self::get_static();
        match static_ref.get() {
            None => {
                let asw = static_ref.get_or_init(|| ArcSwap::new(Arc::new(f())));
                asw.load_full()
            }
            Some(asw) => asw.load_full(),
        }
    }

    fn update_state(state: S) {
        let static_ref = Self::get_static();
        match static_ref.get() {
            None => {
                let state = Arc::new(state);
                let asw = static_ref.get_or_init(|| ArcSwap::new(state.clone()));
                // Lost an init race; the caller's value still wins.
                asw.store(state);
            }
            Some(asw) => {
                asw.store(state.into());
            }
        };
    }

    fn try_state() -> Option<Arc<S>> {
        Self::get_static().get().map(|asw| asw.load_full())
    }
}
