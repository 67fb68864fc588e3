pub struct Event<T> {
    listeners: Vec<Box<dyn FnMut(&T)>>,
}

impl<T> Event<T> {
    pub fn new() -> Self {
        Event {
            listeners: Vec::new(),
        }
    }
    pub fn add_listener<F>(&mut self, f: F)
    where
        F: FnMut(&T) + 'static,
    {
        self.listeners.push(Box::new(f));
    }
    pub fn emit(&mut self, param: &T) {
        for listener in self.listeners.iter_mut() {
            listener(param);
        }
    }
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Event::new()
    }
}

#[macro_export]
macro_rules! impl_add_event_listener {
    ($type:ty, $member:ident, $param:ty, $fn_name:ident) => {
        impl $type {
            pub fn $fn_name<F>(&mut self, f: F)
            where
                F: FnMut(&$param) + 'static,
            {
                self.$member.add_listener(f);
            }
        }
    };
}

/// A single stored action with an explicit unbound state. Unlike `Event`,
/// invoking an unbound `Callback` is a contract violation and panics.
#[derive(Default)]
pub struct Callback(Option<Box<dyn FnMut()>>);

impl Callback {
    pub const fn unbound() -> Self {
        Callback(None)
    }
    pub fn bound<F>(f: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Callback(Some(Box::new(f)))
    }

    pub fn bind<F>(&mut self, f: F)
    where
        F: FnMut() + 'static,
    {
        self.0 = Some(Box::new(f));
    }
    pub fn is_bound(&self) -> bool {
        self.0.is_some()
    }

    #[track_caller]
    pub fn invoke(&mut self) {
        if let Some(action) = self.0.as_mut() {
            action();
        } else {
            panic!("Callback invoked while unbound");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::Cell, rc::Rc};

    #[test]
    fn event_emits_to_all_listeners() {
        let count = Rc::new(Cell::new(0));
        let mut event: Event<i32> = Event::new();
        for _ in 0..3 {
            let count = count.clone();
            event.add_listener(move |value| count.set(count.get() + *value));
        }
        event.emit(&2);
        assert_eq!(count.get(), 6);
    }

    #[test]
    fn callback_invokes_when_bound() {
        let fired = Rc::new(Cell::new(false));
        let fired1 = fired.clone();
        let mut callback = Callback::bound(move || fired1.set(true));
        assert!(callback.is_bound());
        callback.invoke();
        assert!(fired.get());
    }

    #[test]
    #[should_panic]
    fn unbound_callback_panics() {
        Callback::unbound().invoke();
    }
}
