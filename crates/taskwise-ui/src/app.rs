pub mod storage;

use yew::{
    Callback, ContextProvider, Html, function_component, html, use_effect_with, use_reducer,
    use_state,
};
use yew_router::prelude::*;

use crate::components::Sidebar;
use crate::notify::{NotificationBell, ReminderPoll, ToastHandle, ToastHost, ToastList};
use crate::pages::{AnalyticsPage, CalendarPage, DashboardPage, FocusPage, TasksPage};
use crate::store::{Store, StoreHandle};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/tasks")]
    Tasks,
    #[at("/calendar")]
    Calendar,
    #[at("/focus")]
    Focus,
    #[at("/analytics")]
    Analytics,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    match route {
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Tasks => html! { <TasksPage /> },
        Route::Calendar => html! { <CalendarPage /> },
        Route::Focus => html! { <FocusPage /> },
        Route::Analytics => html! { <AnalyticsPage /> },
        Route::NotFound => html! { <div class="not-found">{ "Page not found" }</div> },
    }
}

fn apply_theme_class(theme: storage::ThemeMode) {
    if let Some(element) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    {
        let _ = element.set_attribute("data-theme", theme.storage_value());
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let theme = use_state(storage::load_theme_mode);
    let toasts = ToastHandle(use_reducer(ToastList::default));
    let store = StoreHandle::new(use_reducer(Store::default), toasts.clone());

    {
        let store = store.clone();
        use_effect_with((), move |_| {
            store.reload_all();
        });
    }

    {
        let theme = *theme;
        use_effect_with(theme, move |_| {
            apply_theme_class(theme);
        });
    }

    let on_toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_| {
            let next = theme.toggled();
            storage::save_theme_mode(next);
            theme.set(next);
        })
    };

    html! {
        <BrowserRouter>
            <ContextProvider<StoreHandle> context={store}>
                <div class="layout">
                    <Sidebar />
                    <div class="main">
                        <header class="topbar">
                            <nav class="topnav">
                                <Link<Route> to={Route::Dashboard}>{ "Dashboard" }</Link<Route>>
                                <Link<Route> to={Route::Tasks}>{ "Tasks" }</Link<Route>>
                                <Link<Route> to={Route::Calendar}>{ "Calendar" }</Link<Route>>
                                <Link<Route> to={Route::Focus}>{ "Focus" }</Link<Route>>
                                <Link<Route> to={Route::Analytics}>{ "Analytics" }</Link<Route>>
                            </nav>
                            <div class="topbar-actions">
                                <button class="theme-toggle" onclick={on_toggle_theme}>
                                    {
                                        match *theme {
                                            storage::ThemeMode::Light => "🌙",
                                            storage::ThemeMode::Dark => "☀️",
                                        }
                                    }
                                </button>
                                <NotificationBell />
                            </div>
                        </header>
                        <main class="content">
                            <Switch<Route> render={switch} />
                        </main>
                    </div>
                </div>
                <ToastHost handle={toasts.clone()} />
                <ReminderPoll toasts={toasts} />
            </ContextProvider<StoreHandle>>
        </BrowserRouter>
    }
}
