use std::rc::Rc;

use gloo::timers::callback::Interval;
use taskwise_shared::timer::{FocusTimer, TimerMode, TimerPhase, TimerSettings};
use web_sys::{HtmlInputElement, InputEvent};
use yew::{
    Callback, Html, Reducible, TargetCast, classes, function_component, html, use_effect_with,
    use_reducer, use_state,
};

use crate::app::storage;

#[derive(Clone, PartialEq)]
struct TimerState {
    timer: FocusTimer,
    settings: TimerSettings,
}

enum TimerAction {
    Start,
    Pause,
    Tick,
    Restart,
    SwitchMode(TimerMode),
    SettingsChanged(TimerSettings),
}

impl Reducible for TimerState {
    type Action = TimerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            TimerAction::Start => next.timer.start(),
            TimerAction::Pause => next.timer.pause(),
            TimerAction::Tick => {
                next.timer.tick();
            }
            TimerAction::Restart => next.timer.restart(&next.settings),
            TimerAction::SwitchMode(mode) => next.timer.switch_mode(mode, &next.settings),
            TimerAction::SettingsChanged(settings) => {
                next.settings = settings;
                // Re-arm an idle countdown so the new duration shows
                // immediately; a running one keeps its remaining time.
                if next.timer.phase() == TimerPhase::Idle {
                    next.timer.switch_mode(next.timer.mode(), &next.settings);
                }
            }
        }
        Rc::new(next)
    }
}

fn play_alarm() {
    if let Ok(audio) = web_sys::HtmlAudioElement::new_with_src("/static/alarm.mp3") {
        if let Err(error) = audio.play() {
            tracing::warn!(error = ?error, "alarm playback rejected");
        }
    }
}

#[function_component(FocusPage)]
pub fn focus_page() -> Html {
    let state = use_reducer(|| {
        let settings = storage::load_timer_settings();
        TimerState {
            timer: FocusTimer::new(&settings),
            settings,
        }
    });
    let show_settings = use_state(|| false);

    let phase = state.timer.phase();
    let mode = state.timer.mode();
    let running = phase == TimerPhase::Running;

    {
        let state = state.clone();
        use_effect_with(running, move |running| {
            let interval = running.then(|| {
                Interval::new(1_000, move || state.dispatch(TimerAction::Tick))
            });
            move || drop(interval)
        });
    }

    {
        let muted = state.settings.muted;
        use_effect_with(phase, move |phase| {
            if *phase == TimerPhase::Expired && !muted {
                play_alarm();
            }
        });
    }

    let on_action = {
        let state = state.clone();
        Callback::from(move |_| {
            state.dispatch(match state.timer.phase() {
                TimerPhase::Idle | TimerPhase::Paused => TimerAction::Start,
                TimerPhase::Running => TimerAction::Pause,
                TimerPhase::Expired => TimerAction::Restart,
            });
        })
    };

    let on_reset = {
        let state = state.clone();
        Callback::from(move |_| state.dispatch(TimerAction::SwitchMode(state.timer.mode())))
    };

    let on_toggle_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(!*show_settings))
    };

    let accent = state
        .settings
        .color_for(mode)
        .map(|color| format!("background-color: {color};"));

    let settings_panel = if *show_settings {
        let edit_minutes = |apply: fn(&mut TimerSettings, u32)| {
            let state = state.clone();
            Callback::from(move |event: InputEvent| {
                let raw = event.target_unchecked_into::<HtmlInputElement>().value();
                let Ok(minutes) = raw.parse::<u32>() else {
                    return;
                };
                let mut settings = state.settings.clone();
                apply(&mut settings, minutes);
                storage::save_timer_settings(&settings);
                state.dispatch(TimerAction::SettingsChanged(settings));
            })
        };

        let edit_color = |apply: fn(&mut TimerSettings, Option<String>)| {
            let state = state.clone();
            Callback::from(move |event: InputEvent| {
                let raw = event.target_unchecked_into::<HtmlInputElement>().value();
                let mut settings = state.settings.clone();
                apply(&mut settings, (!raw.is_empty()).then_some(raw));
                storage::save_timer_settings(&settings);
                state.dispatch(TimerAction::SettingsChanged(settings));
            })
        };

        let on_toggle_mute = {
            let state = state.clone();
            Callback::from(move |_| {
                let mut settings = state.settings.clone();
                settings.muted = !settings.muted;
                storage::save_timer_settings(&settings);
                state.dispatch(TimerAction::SettingsChanged(settings));
            })
        };

        html! {
            <div class="focus-settings">
                <div class="modal-row">
                    <label>{ "Focus (min)" }
                        <input
                            type="number" min="1"
                            value={state.settings.focus_minutes.to_string()}
                            oninput={edit_minutes(|s, m| s.focus_minutes = m)}
                        />
                    </label>
                    <label>{ "Short break (min)" }
                        <input
                            type="number" min="1"
                            value={state.settings.short_minutes.to_string()}
                            oninput={edit_minutes(|s, m| s.short_minutes = m)}
                        />
                    </label>
                    <label>{ "Long break (min)" }
                        <input
                            type="number" min="1"
                            value={state.settings.long_minutes.to_string()}
                            oninput={edit_minutes(|s, m| s.long_minutes = m)}
                        />
                    </label>
                </div>
                <div class="modal-row">
                    <label>{ "Focus color" }
                        <input
                            type="color"
                            value={state.settings.focus_color.clone().unwrap_or_default()}
                            oninput={edit_color(|s, c| s.focus_color = c)}
                        />
                    </label>
                    <label>{ "Short break color" }
                        <input
                            type="color"
                            value={state.settings.short_color.clone().unwrap_or_default()}
                            oninput={edit_color(|s, c| s.short_color = c)}
                        />
                    </label>
                    <label>{ "Long break color" }
                        <input
                            type="color"
                            value={state.settings.long_color.clone().unwrap_or_default()}
                            oninput={edit_color(|s, c| s.long_color = c)}
                        />
                    </label>
                </div>
                <label class="mute-toggle">
                    <input
                        type="checkbox"
                        checked={state.settings.muted}
                        onchange={on_toggle_mute}
                    />
                    { "Mute alarm" }
                </label>
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <div class={classes!("page", "focus-page", mode.css_class())} style={accent}>
            <div class="mode-tabs">
                {
                    for TimerMode::all().into_iter().map(|candidate| {
                        let state = state.clone();
                        let is_active = candidate == mode;
                        html! {
                            <button
                                class={classes!("filter-tab", is_active.then_some("active"))}
                                onclick={Callback::from(move |_| {
                                    state.dispatch(TimerAction::SwitchMode(candidate))
                                })}
                            >
                                { candidate.label() }
                            </button>
                        }
                    })
                }
            </div>
            <div class="timer-display">{ state.timer.display() }</div>
            <div class="timer-status">
                {
                    if phase == TimerPhase::Expired {
                        "Time's up!"
                    } else {
                        mode.status_text()
                    }
                }
            </div>
            <div class="timer-controls">
                <button class="primary big" onclick={on_action}>
                    { state.timer.action_label() }
                </button>
                <button onclick={on_reset}>{ "RESET" }</button>
                <button onclick={on_toggle_settings}>{ "⚙" }</button>
            </div>
            { settings_panel }
        </div>
    }
}
