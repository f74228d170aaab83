use std::rc::Rc;

use deeplink_host::{PresenceSignal, RedirectPresenter, ReferralData};
use deeplink_host_web::{
    install_fault_listeners, install_presence_listeners, read_page_context, PageFault,
};
use leptos::*;
use leptos_meta::*;
use redirect_runtime::{
    report_boot_failure, RedirectConfig, RedirectController, RedirectError, RedirectHostContext,
    ReferralSummary,
};

const ERROR_COLOR: &str = "#ea4335";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageSection {
    Loading,
    Store,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StatusLine {
    message: String,
    is_error: bool,
}

#[derive(Clone, Copy)]
/// Presenter that writes into the landing page signals.
struct SignalPresenter {
    status: RwSignal<StatusLine>,
    summary: RwSignal<Option<ReferralSummary>>,
    section: RwSignal<PageSection>,
}

impl RedirectPresenter for SignalPresenter {
    fn update_status(&self, message: &str, is_error: bool) {
        self.status.set(StatusLine {
            message: message.to_string(),
            is_error,
        });
    }

    fn show_referral_info(&self, data: &ReferralData) {
        let summary = ReferralSummary::from_data(data);
        self.summary.set(summary.is_visible().then_some(summary));
    }

    fn show_loading_section(&self) {
        self.section.set(PageSection::Loading);
    }

    fn show_store_section(&self) {
        self.section.set(PageSection::Store);
    }
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();
    let app_name = RedirectConfig::bundled().app_name;

    view! {
        <Title text=format!("Open {app_name}") />
        <Meta name="description" content="Opens the app with your referral, or the store if it is not installed." />
        <LandingPage />
    }
}

#[component]
pub fn LandingPage() -> impl IntoView {
    let config = RedirectConfig::bundled();
    let presenter = SignalPresenter {
        status: create_rw_signal(StatusLine {
            message: "Initializing...".to_string(),
            is_error: false,
        }),
        summary: create_rw_signal(None),
        section: create_rw_signal(PageSection::Loading),
    };
    let controller = store_value(None::<RedirectController>);

    let boot_config = config.clone();
    create_effect(move |booted: Option<()>| {
        if booted.is_none() {
            controller.set_value(boot_redirect(boot_config.clone(), presenter));
        }
    });

    let show_store = move |_| match controller.get_value() {
        Some(active) => active.show_store_buttons(),
        None => presenter.show_store_section(),
    };
    let section_display = move |section: PageSection| {
        if presenter.section.get() == section {
            "block"
        } else {
            "none"
        }
    };

    view! {
        <main class="landing">
            <header class="landing-header">
                <h1>{config.app_name.clone()}</h1>
            </header>

            {move || {
                presenter
                    .summary
                    .get()
                    .map(|summary| view! { <ReferralCard summary=summary controller=controller /> })
            }}

            <p
                class="status-text"
                style:color=move || {
                    if presenter.status.with(|status| status.is_error) { ERROR_COLOR } else { "" }
                }
            >
                {move || presenter.status.with(|status| status.message.clone())}
            </p>

            <section class="loading-section" style:display=move || section_display(PageSection::Loading)>
                <div class="progress-bar"></div>
                <button class="link-button" on:click=show_store>
                    "Download the app instead"
                </button>
            </section>

            <section class="store-section" style:display=move || section_display(PageSection::Store)>
                <a class="store-button app-store" href=config.app_store_url.clone()>
                    "Download on the App Store"
                </a>
                <a class="store-button play-store" href=config.play_store_url.clone()>
                    "Get it on Google Play"
                </a>
                <a class="web-fallback" href=config.web_fallback_url.clone()>
                    "Continue in the browser"
                </a>
            </section>
        </main>
    }
}

#[component]
fn ReferralCard(
    summary: ReferralSummary,
    controller: StoredValue<Option<RedirectController>>,
) -> impl IntoView {
    let copy_code = move |_| {
        if let Some(active) = controller.get_value() {
            spawn_local(async move {
                active.copy_referral_code().await;
            });
        }
    };

    view! {
        <section class="referral-card">
            {summary.referrer.map(|referrer| view! {
                <div class="referral-row">
                    <span class="label">"Invited by"</span>
                    <span class="value">{referrer}</span>
                </div>
            })}
            {summary.referral_code.map(|code| view! {
                <div class="referral-row">
                    <span class="label">"Referral code"</span>
                    <span class="value code">{code}</span>
                    <button class="copy-button" on:click=copy_code>"Copy"</button>
                </div>
            })}
            {summary.campaign.map(|campaign| view! {
                <div class="referral-row">
                    <span class="label">"Campaign"</span>
                    <span class="value">{campaign}</span>
                </div>
            })}
        </section>
    }
}

fn boot_redirect(config: RedirectConfig, presenter: SignalPresenter) -> Option<RedirectController> {
    if let Err(err) = install_fault_listeners(Rc::new(log_page_fault)) {
        logging::warn!("page fault listeners unavailable: {err}");
    }

    let presenter: Rc<dyn RedirectPresenter> = Rc::new(presenter);
    let page = match read_page_context() {
        Ok(page) => page,
        Err(err) => {
            report_boot_failure(presenter.as_ref(), &RedirectError::PageContext(err));
            return None;
        }
    };

    let controller =
        RedirectController::start(config, RedirectHostContext::default(), presenter, &page)?;
    let listener = controller.clone();
    if let Err(err) = install_presence_listeners(Rc::new(move |signal: PresenceSignal| {
        listener.handle_presence(signal)
    })) {
        logging::warn!("presence listeners unavailable: {err}");
    }
    Some(controller)
}

fn log_page_fault(fault: PageFault) {
    match fault {
        PageFault::UncaughtError(message) => {
            logging::error!("[DeepLink Error] Uncaught error: {message}")
        }
        PageFault::UnhandledRejection(reason) => {
            logging::error!("[DeepLink Error] Unhandled promise rejection: {reason}")
        }
    }
}
