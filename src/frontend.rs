use std::cell::Cell;
use std::rc::Rc;

use gloo_net::http::Request;
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement, MouseEvent,
    SubmitEvent,
};
use yew::prelude::*;

use crate::animate;
use crate::config::SiteConfig;
use crate::contact::{
    deliver, ContactError, ContactPayload, ContactReply, ContactResponse, ContactTransport,
    SENT_MESSAGE,
};
use crate::dom::document;
use crate::effects;
use crate::filter::ALL_CATEGORIES;
use crate::globals;
use crate::logging::{log_event, LogLevel};
use crate::motion::{TypingLoop, TypingTiming};
use crate::notify::{show_notification, NotificationKind};
use crate::timing::Debounce;

const OWNER: &str = "Alex Morgan";
const TYPED_ROLES: [&str; 3] = ["Systems Engineer", "Rust Developer", "Open Source Maintainer"];
const SECTIONS: [(&str, &str); 5] = [
    ("#home", "Home"),
    ("#about", "About"),
    ("#skills", "Skills"),
    ("#projects", "Projects"),
    ("#contact", "Contact"),
];
const SKILLS: [(&str, &str); 5] = [
    ("Rust", "90%"),
    ("TypeScript", "80%"),
    ("Python", "75%"),
    ("PostgreSQL", "70%"),
    ("Kubernetes", "60%"),
];
const STATS: [(&str, u32); 3] = [
    ("Projects shipped", 42),
    ("Open source commits", 1_250),
    ("Years building software", 8),
];
const CATEGORIES: [(&str, &str); 4] = [
    (ALL_CATEGORIES, "All"),
    ("web", "Web"),
    ("systems", "Systems"),
    ("ml", "Machine Learning"),
];

#[derive(Clone, Copy, PartialEq)]
struct Project {
    title: &'static str,
    category: &'static str,
    summary: &'static str,
    image: &'static str,
    href: &'static str,
}

const PROJECTS: [Project; 5] = [
    Project {
        title: "Ledgerline",
        category: "systems",
        summary: "Append-only event store with snapshotting and crash-safe compaction.",
        image: "/images/ledgerline.webp",
        href: "https://github.com/",
    },
    Project {
        title: "Tidewatch",
        category: "web",
        summary: "Real-time coastal sensor dashboard with offline-first sync.",
        image: "/images/tidewatch.webp",
        href: "https://github.com/",
    },
    Project {
        title: "Sparrow",
        category: "ml",
        summary: "Bird-call classifier running on-device with a quantized CNN.",
        image: "/images/sparrow.webp",
        href: "https://github.com/",
    },
    Project {
        title: "Portico",
        category: "web",
        summary: "Static site generator with incremental rebuilds and image pipelines.",
        image: "/images/portico.webp",
        href: "https://github.com/",
    },
    Project {
        title: "Quarry",
        category: "systems",
        summary: "Columnar query engine experiment with vectorized filters.",
        image: "/images/quarry.webp",
        href: "https://github.com/",
    },
];

struct FetchTransport {
    endpoint: String,
}

impl ContactTransport for FetchTransport {
    async fn post(&self, payload: &ContactPayload) -> Result<ContactReply, String> {
        let response = Request::post(&self.endpoint)
            .json(payload)
            .map_err(|err| err.to_string())?
            .send()
            .await
            .map_err(|err| err.to_string())?;
        let http_ok = response.ok();
        let body = response
            .json::<ContactResponse>()
            .await
            .map_err(|err| err.to_string())?;

        Ok(ContactReply { http_ok, body })
    }
}

/// Re-enables the submit button however the submission ends.
struct PendingSubmit(UseStateHandle<bool>);

impl Drop for PendingSubmit {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

fn textarea_value(node: &NodeRef) -> String {
    node.cast::<HtmlTextAreaElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

#[derive(Properties, PartialEq)]
struct ContactFormProps {
    config: Rc<SiteConfig>,
}

#[function_component(ContactForm)]
fn contact_form(props: &ContactFormProps) -> Html {
    let submitting = use_state(|| false);
    let form = use_node_ref();
    let name = use_node_ref();
    let email = use_node_ref();
    let subject = use_node_ref();
    let message = use_node_ref();

    let onsubmit = {
        let config = props.config.clone();
        let submitting = submitting.clone();
        let form = form.clone();
        let name = name.clone();
        let email = email.clone();
        let subject = subject.clone();
        let message = message.clone();

        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let payload = ContactPayload::new(
                &input_value(&name),
                &input_value(&email),
                &input_value(&subject),
                &textarea_value(&message),
            );
            let contact = match payload.validate() {
                Ok(contact) => contact,
                Err(err) => {
                    show_notification(&config, &err.to_string(), NotificationKind::Error);
                    return;
                }
            };

            submitting.set(true);
            let pending = PendingSubmit(submitting.clone());
            let config = config.clone();
            let form = form.clone();

            spawn_local(async move {
                let _pending = pending;
                let transport = FetchTransport {
                    endpoint: config.contact_endpoint.clone(),
                };
                log_event(
                    &config,
                    LogLevel::Info,
                    "contact.submit",
                    json!({ "endpoint": config.contact_endpoint }),
                );

                match deliver(&transport, &contact).await {
                    Ok(()) => {
                        log_event(&config, LogLevel::Info, "contact.sent", json!({}));
                        show_notification(&config, SENT_MESSAGE, NotificationKind::Success);
                        if let Some(form) = form.cast::<HtmlFormElement>() {
                            form.reset();
                        }
                    }
                    Err(err) => {
                        match &err {
                            ContactError::Transport(detail) => log_event(
                                &config,
                                LogLevel::Error,
                                "contact.transport_failed",
                                json!({ "error": detail }),
                            ),
                            other => log_event(
                                &config,
                                LogLevel::Warn,
                                "contact.rejected",
                                json!({ "message": other.to_string() }),
                            ),
                        }
                        show_notification(&config, &err.to_string(), NotificationKind::Error);
                    }
                }
            });
        })
    };

    let busy = *submitting;

    html! {
        <form id="contact-form" class="contact-form fade-in-up" ref={form} onsubmit={onsubmit} novalidate="novalidate">
            <label for="name">{"Name"}</label>
            <input id="name" name="name" type="text" autocomplete="name" ref={name} />
            <label for="email">{"Email"}</label>
            <input id="email" name="email" type="email" autocomplete="email" ref={email} />
            <label for="subject">{"Subject"}</label>
            <input id="subject" name="subject" type="text" ref={subject} />
            <label for="message">{"Message"}</label>
            <textarea id="message" name="message" rows="6" ref={message}></textarea>
            <button id="submit-btn" class="btn-primary" type="submit" disabled={busy}>
                <span id="btn-text" class={classes!(busy.then_some("hidden"))}>{"Send message"}</span>
                <span id="btn-spinner" class={classes!("spinner", (!busy).then_some("hidden"))} aria-hidden="true"></span>
            </button>
        </form>
    }
}

fn nav_links() -> Html {
    SECTIONS
        .iter()
        .map(|(href, label)| html! { <li><a href={*href}>{*label}</a></li> })
        .collect()
}

#[function_component(NavBar)]
fn nav_bar() -> Html {
    html! {
        <nav id="navbar" class="navbar" aria-label="Primary">
            <a class="brand" href="#home">{OWNER}</a>
            <ul class="nav-links">{nav_links()}</ul>
            <button id="mobile-menu-btn" class="mobile-menu-btn" type="button" aria-label="Toggle navigation">
                <i class="fas fa-bars" aria-hidden="true"></i>
            </button>
            <ul id="mobile-menu" class="mobile-menu hidden">{nav_links()}</ul>
        </nav>
    }
}

#[function_component(Hero)]
fn hero() -> Html {
    let role = use_node_ref();

    {
        let role = role.clone();
        use_effect_with((), move |_| {
            let stopped = Rc::new(Cell::new(false));
            if let Some(element) = role.cast::<HtmlElement>() {
                animate::run_typing_loop(
                    element,
                    TypingLoop::new(TYPED_ROLES, TypingTiming::default()),
                    stopped.clone(),
                );
            }
            move || stopped.set(true)
        });
    }

    html! {
        <header id="home" class="hero">
            <div class="hero-background parallax" data-speed="0.5" aria-hidden="true"></div>
            <div class="hero-content fade-in-up">
                <h1>{OWNER}</h1>
                <p class="hero-role">
                    <span id="typed-role" ref={role}></span>
                    <span class="caret" aria-hidden="true">{"|"}</span>
                </p>
                <a class="btn-primary" href="#contact">{"Get in touch"}</a>
            </div>
        </header>
    }
}

#[function_component(Skills)]
fn skills() -> Html {
    html! {
        <section id="skills" class="section" aria-labelledby="skills-heading">
            <h2 id="skills-heading" class="fade-in-up">{"Skills"}</h2>
            <ul class="skill-list">
                { for SKILLS.iter().map(|(name, width)| html! {
                    <li class="skill fade-in-up">
                        <div class="skill-label"><span>{*name}</span><span>{*width}</span></div>
                        <div class="skill-track">
                            <div class="skill-progress" data-width={*width}></div>
                        </div>
                    </li>
                }) }
            </ul>
        </section>
    }
}

#[function_component(Stats)]
fn stats() -> Html {
    html! {
        <section class="section stats" aria-label="Highlights">
            { for STATS.iter().map(|(label, target)| html! {
                <div class="stat card reveal">
                    <span class="counter" data-target={target.to_string()} data-duration="2000"></span>
                    <span class="stat-label">{*label}</span>
                </div>
            }) }
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct ProjectsProps {
    filter_runs: Debounce,
}

#[function_component(Projects)]
fn projects(props: &ProjectsProps) -> Html {
    let buttons = CATEGORIES
        .iter()
        .map(|(category, label)| {
            let runs = props.filter_runs.clone();
            let category = *category;
            let onclick = Callback::from(move |_: MouseEvent| {
                if let Some(document) = document() {
                    animate::filter_projects(&document, category, &runs);
                }
            });

            html! {
                <button
                    type="button"
                    class={classes!("filter-btn", (category == ALL_CATEGORIES).then_some("active"))}
                    data-category={category}
                    onclick={onclick}
                >
                    {*label}
                </button>
            }
        })
        .collect::<Html>();

    html! {
        <section id="projects" class="section" aria-labelledby="projects-heading">
            <h2 id="projects-heading" class="fade-in-up">{"Projects"}</h2>
            <div class="filter-bar" role="group" aria-label="Filter projects">{buttons}</div>
            <div class="project-grid">
                { for PROJECTS.iter().map(|project| html! {
                    <article class="project-item project-card" data-category={project.category}>
                        <img class="project-image" data-src={project.image} alt={project.title} />
                        <h3>{project.title}</h3>
                        <p>{project.summary}</p>
                        <a href={project.href} target="_blank" rel="noopener noreferrer">{"Source"}</a>
                    </article>
                }) }
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct AppProps {
    config: Rc<SiteConfig>,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    // Buttons and script callers share one run counter so either can cancel the other.
    let filter_runs = use_state(Debounce::default);

    {
        let config = props.config.clone();
        let filter_runs = (*filter_runs).clone();
        use_effect_with((), move |_| {
            globals::expose(config.clone(), filter_runs);
            let page_effects = effects::install(config);
            move || drop(page_effects)
        });
    }

    html! {
        <>
            <div id="scroll-progress" class="scroll-progress" aria-hidden="true"></div>
            <NavBar />
            <main id="content">
                <Hero />
                <section id="about" class="section" aria-labelledby="about-heading">
                    <h2 id="about-heading" class="fade-in-up">{"About"}</h2>
                    <p class="fade-in-up">
                        {"I build dependable backend systems and the occasional pleasant interface on top of them."}
                    </p>
                </section>
                <Skills />
                <Stats />
                <Projects filter_runs={(*filter_runs).clone()} />
                <section id="contact" class="section" aria-labelledby="contact-heading">
                    <h2 id="contact-heading" class="fade-in-up">{"Contact"}</h2>
                    <ContactForm config={props.config.clone()} />
                </section>
            </main>
            <footer class="site-footer">
                <a href="#home">{"Back to start"}</a>
            </footer>
            <a id="back-to-top" class="back-to-top" href="#" aria-label="Back to top">{"↑"}</a>
        </>
    }
}

pub fn run() {
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"))
        .expect("missing #app mount point");
    let config = Rc::new(SiteConfig::from_element(&root));

    yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
}
