/// Plot window, window options and prepared calls.
pub mod plot_window;
