// Scope guard around console.time / console.timeEnd, used to report how long
// a frame tick takes when frame timing is switched on.

use web_sys::console;

pub struct Timer<'a> {
    label: &'a str,
}

impl<'a> Timer<'a> {
    pub fn start(label: &'a str) -> Timer<'a> {
        console::time_with_label(label);
        Timer { label }
    }

    pub fn start_if(enabled: bool, label: &'a str) -> Option<Timer<'a>> {
        if enabled {
            Some(Timer::start(label))
        } else {
            None
        }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.label);
    }
}
