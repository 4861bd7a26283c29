use gloo_timers::callback::Interval;
use shared::candidates::{self, Candidate};
use shared::error::{check_can_submit, Error};
use shared::export::{pin_matches, render_csv, EXPORT_FILENAME};
use shared::models::{AggregateRow, NewVote};
use shared::tally::Tally;
use wasm_bindgen::JsValue;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api;
use crate::config::{Config, POLL_INTERVAL_MS};
use crate::device;
use crate::download;
use crate::realtime::Subscription;
use crate::styles::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub config: Config,
}

#[derive(PartialEq)]
enum Notice {
    Recorded,
    AlreadyVoted,
    SubmitFailed(String),
}

pub enum Msg {
    TotalsFetched(Vec<AggregateRow>),
    FetchFailed(Error),
    PollTick,
    VoteInserted(String),
    Select(&'static str),
    UpdateSearch(String),
    UpdatePin(String),
    Submit,
    Submitted(Result<(), Error>),
    Export,
}

pub struct App {
    tally: Tally,
    selected: Option<&'static str>,
    has_voted: bool,
    device_id: String,
    search: String,
    pin: String,
    loading: bool,
    submitting: bool,
    notice: Option<Notice>,
    _poll: Option<Interval>,
    _subscription: Option<Subscription>,
}

impl Component for App {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let config = ctx.props().config;

        ctx.link().send_future(async move {
            match api::fetch_totals(config).await {
                Ok(rows) => Msg::TotalsFetched(rows),
                Err(e) => Msg::FetchFailed(e),
            }
        });

        let link = ctx.link().clone();
        let poll = Interval::new(POLL_INTERVAL_MS, move || link.send_message(Msg::PollTick));

        let subscription = Subscription::start(
            &config.realtime_url(),
            ctx.link().callback(Msg::VoteInserted),
        );
        if subscription.is_none() {
            // Poll-only mode from here on.
            web_sys::console::warn_1(&JsValue::from_str("realtime socket unavailable"));
        }

        Self {
            tally: Tally::new(),
            selected: None,
            has_voted: device::has_voted(),
            device_id: device::get_or_create_device_id(),
            search: String::new(),
            pin: String::new(),
            loading: true,
            submitting: false,
            notice: None,
            _poll: Some(poll),
            _subscription: subscription,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::TotalsFetched(rows) => {
                self.tally.apply_snapshot(&rows);
                self.loading = false;
                true
            }
            Msg::FetchFailed(e) => {
                // Previous snapshot stays; the next tick supersedes this.
                web_sys::console::error_1(&JsValue::from_str(&e.to_string()));
                self.loading = false;
                true
            }
            Msg::PollTick => {
                let config = ctx.props().config;
                ctx.link().send_future(async move {
                    match api::fetch_totals(config).await {
                        Ok(rows) => Msg::TotalsFetched(rows),
                        Err(e) => Msg::FetchFailed(e),
                    }
                });
                false
            }
            Msg::VoteInserted(candidate_id) => {
                self.tally.record_insert(&candidate_id);
                true
            }
            Msg::Select(id) => {
                if self.has_voted || self.submitting {
                    return false;
                }
                self.selected = Some(id);
                true
            }
            Msg::UpdateSearch(query) => {
                self.search = query;
                true
            }
            Msg::UpdatePin(pin) => {
                self.pin = pin;
                true
            }
            Msg::Submit => {
                if self.submitting {
                    return false;
                }
                if let Err(e) = check_can_submit(self.selected, self.has_voted) {
                    self.notice = Some(match e {
                        Error::DuplicateVote => Notice::AlreadyVoted,
                        _ => Notice::SubmitFailed(e.to_string()),
                    });
                    return true;
                }
                self.submitting = true;
                self.notice = None;
                let config = ctx.props().config;
                let vote = NewVote {
                    device_id: self.device_id.clone(),
                    candidate_id: self.selected.unwrap_or_default().to_string(),
                };
                ctx.link()
                    .send_future(async move { Msg::Submitted(api::insert_vote(config, vote).await) });
                true
            }
            Msg::Submitted(result) => {
                self.submitting = false;
                match result {
                    Ok(()) => {
                        // The count itself arrives via the insert notification
                        // or the next poll, never a local bump.
                        self.has_voted = true;
                        device::set_has_voted(true);
                        self.notice = Some(Notice::Recorded);
                    }
                    Err(Error::DuplicateVote) => {
                        self.has_voted = true;
                        device::set_has_voted(true);
                        self.notice = Some(Notice::AlreadyVoted);
                    }
                    Err(e) => {
                        // Selection stays active so the user can retry.
                        self.notice = Some(Notice::SubmitFailed(e.to_string()));
                    }
                }
                true
            }
            Msg::Export => {
                if pin_matches(&self.pin) {
                    download::offer_csv(EXPORT_FILENAME, &render_csv(&self.tally));
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let filtered = candidates::search(&self.search);
        html! {
            <div class={CONTAINER}>
                {self.render_header(ctx)}
                {self.render_toolbar(ctx, filtered.len())}
                {self.render_notice()}
                {if self.loading {
                    html! {
                        <div class="flex justify-center p-8">
                            <div class={combine_classes("animate-pulse text-lg", TEXT_MUTED)}>
                                {"Loading results..."}
                            </div>
                        </div>
                    }
                } else {
                    html! {
                        <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                            {for filtered.iter().map(|c| self.render_card(ctx, c))}
                        </div>
                    }
                }}
                {self.render_submit_panel(ctx)}
            </div>
        }
    }
}

impl App {
    fn render_header(&self, ctx: &Context<Self>) -> Html {
        let on_pin = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::UpdatePin(input.value())
        });
        let unlocked = pin_matches(&self.pin);

        html! {
            <header class="flex flex-col md:flex-row md:items-center md:justify-between gap-4 mb-6">
                <div>
                    <h1 class={HEADING_LG}>{"Poling Bakal Calon Kades Suela - 2026"}</h1>
                    <p class={TEXT_MUTED}>{"Pick one candidate. One device, one vote. Live results."}</p>
                </div>
                <div class="flex items-center gap-2">
                    <input
                        type="password"
                        class={INPUT_BASE}
                        placeholder="Admin PIN"
                        value={self.pin.clone()}
                        oninput={on_pin}
                    />
                    {if unlocked {
                        html! {
                            <button
                                onclick={ctx.link().callback(|_| Msg::Export)}
                                class={combine_classes(BUTTON_BASE, BUTTON_MUTED)}
                            >
                                {"Export CSV"}
                            </button>
                        }
                    } else {
                        html! {
                            <button disabled={true} class={combine_classes(BUTTON_BASE, BUTTON_MUTED)}>
                                {"Admin"}
                            </button>
                        }
                    }}
                </div>
            </header>
        }
    }

    fn render_toolbar(&self, ctx: &Context<Self>, shown: usize) -> Html {
        let on_search = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::UpdateSearch(input.value())
        });

        html! {
            <section class={combine_classes(FLEX_BETWEEN, "flex-col md:flex-row gap-3 mb-4")}>
                <div class={TEXT_MUTED}>
                    {"Total ballots: "}
                    <span class="font-semibold text-gray-100">{self.tally.total()}</span>
                </div>
                <div class="flex items-center gap-2">
                    <input
                        type="text"
                        class={combine_classes(INPUT_BASE, "w-64")}
                        placeholder="Search candidates..."
                        value={self.search.clone()}
                        oninput={on_search}
                    />
                    <span class="text-xs text-gray-500">{format!("{shown} shown")}</span>
                </div>
            </section>
        }
    }

    fn render_notice(&self) -> Html {
        match &self.notice {
            Some(Notice::Recorded) => html! {
                <div class={alert_style("success")}>{"Your vote has been recorded."}</div>
            },
            Some(Notice::AlreadyVoted) => html! {
                <div class={alert_style("info")}>{"This device has already voted."}</div>
            },
            Some(Notice::SubmitFailed(reason)) => html! {
                <div class={alert_style("error")}>
                    {format!("Could not record your vote, please try again. ({reason})")}
                </div>
            },
            None => html! {},
        }
    }

    fn render_card(&self, ctx: &Context<Self>, candidate: &Candidate) -> Html {
        let count = self.tally.count(candidate.id);
        let pct = self.tally.percentage(candidate.id);
        let active = self.selected == Some(candidate.id);
        let id = candidate.id;
        let onclick = ctx.link().callback(move |_| Msg::Select(id));

        html! {
            <article class={CARD} key={candidate.id}>
                <div class={combine_classes(FLEX_BETWEEN, "items-start gap-2 mb-2")}>
                    <div>
                        <h3 class={HEADING_SM}>{candidate.name}</h3>
                        <p class={TEXT_MUTED}>{candidate.alias.unwrap_or("")}</p>
                    </div>
                    <button
                        {onclick}
                        disabled={self.has_voted || self.submitting}
                        class={combine_classes(
                            BUTTON_BASE,
                            if active { BUTTON_PRIMARY } else { BUTTON_MUTED },
                        )}
                    >
                        {if active { "Selected" } else { "Select" }}
                    </button>
                </div>
                <div class="mt-3">
                    <div class={combine_classes(FLEX_BETWEEN, "text-xs mb-1")}>
                        <span class={TEXT_MUTED}>{"Votes"}</span>
                        <span class="font-medium text-gray-100">{format!("{count} ({pct}%)")}</span>
                    </div>
                    <div class={PROGRESS_TRACK}>
                        <div class={PROGRESS_FILL} style={format!("width: {pct}%")}></div>
                    </div>
                </div>
            </article>
        }
    }

    fn render_submit_panel(&self, ctx: &Context<Self>) -> Html {
        let label = if self.has_voted {
            "Already voted".to_string()
        } else if self.submitting {
            "Submitting...".to_string()
        } else if let Some(c) = self.selected.and_then(candidates::find) {
            format!("Cast vote: {}", c.name)
        } else {
            "Select a candidate first".to_string()
        };

        html! {
            <section class="mt-8">
                <div class={combine_classes(
                    "bg-gray-800 border border-gray-700 rounded-2xl p-5",
                    "flex flex-col md:flex-row md:items-center md:justify-between gap-4",
                )}>
                    <div>
                        <h4 class="font-semibold text-gray-100">{"Cast Your Vote"}</h4>
                        <p class={TEXT_MUTED}>{"Double-check your choice. One device, one vote."}</p>
                    </div>
                    <button
                        onclick={ctx.link().callback(|_| Msg::Submit)}
                        disabled={self.selected.is_none() || self.has_voted || self.submitting}
                        class={combine_classes(BUTTON_BASE, BUTTON_SUCCESS)}
                    >
                        {label}
                    </button>
                </div>
            </section>
        }
    }
}
