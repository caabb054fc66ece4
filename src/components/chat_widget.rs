use crate::models::chat::{
    search_url, ChatMessage, MessageBody, Speaker, Transcript, FOUND, SEARCHING,
};
use crate::models::search::GroupedResults;
use leptos::html::Div;
use leptos::prelude::*;

/// Fetch the widget's answer to a question from the search endpoint.
#[cfg(feature = "hydrate")]
async fn fetch_results(query: String) -> Result<GroupedResults, String> {
    let resp = gloo_net::http::Request::get(&search_url(&query))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    resp.json::<GroupedResults>().await.map_err(|e| e.to_string())
}

#[cfg(not(feature = "hydrate"))]
async fn fetch_results(query: String) -> Result<GroupedResults, String> {
    Err(format!("cannot fetch {} outside the browser", search_url(&query)))
}

/// Floating assistant that answers questions with site search results.
#[component]
pub fn ChatWidget() -> impl IntoView {
    let transcript = RwSignal::new(Transcript::new());
    let (input, set_input) = signal(String::new());
    let (open, set_open) = signal(false);
    let end_ref = NodeRef::<Div>::new();

    // Keep the latest message in view
    Effect::new(move |_| {
        transcript.track();
        if let Some(end) = end_ref.get() {
            end.scroll_into_view();
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let text = input.get_untracked();
        let Some(pending) = transcript.try_update(|t| t.submit(&text)).flatten() else {
            return;
        };
        set_input.set(String::new());
        leptos::task::spawn_local(async move {
            let outcome = fetch_results(pending.query).await;
            transcript.update(|t| {
                t.resolve(pending.ticket, outcome);
            });
        });
    };

    view! {
        <div class="chat-widget">
            <Show
                when=move || open.get()
                fallback=move || view! {
                    <button class="chat-toggle" on:click=move |_| set_open.set(true)>
                        "Помощник"
                    </button>
                }
            >
                <div class="chat-panel">
                    <div class="chat-header">
                        <span>"Виртуальный помощник"</span>
                        <button class="chat-close" on:click=move |_| set_open.set(false)>
                            "×"
                        </button>
                    </div>
                    <div class="chat-messages">
                        <For
                            each=move || transcript.with(|t| t.messages().to_vec())
                            key=|m| (m.id, m.body != MessageBody::Searching)
                            children=move |m| view! { <ChatBubble message=m/> }
                        />
                        <div node_ref=end_ref></div>
                    </div>
                    <form class="chat-input" on:submit=on_submit>
                        <input
                            type="text"
                            placeholder="Введите ваш вопрос..."
                            on:input=move |ev| set_input.set(event_target_value(&ev))
                            prop:value=input
                        />
                        <button
                            type="submit"
                            disabled=move || transcript.with(|t| t.is_busy())
                        >
                            "Отправить"
                        </button>
                    </form>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn ChatBubble(message: ChatMessage) -> impl IntoView {
    let class = match message.speaker {
        Speaker::User => "chat-message user",
        Speaker::Assistant => "chat-message assistant",
    };

    let body = match message.body {
        MessageBody::Text(text) => view! { <p>{text}</p> }.into_any(),
        MessageBody::Searching => view! { <p class="searching">{SEARCHING}</p> }.into_any(),
        MessageBody::Results(groups) => view! {
            <div class="chat-results">
                <p>{FOUND}</p>
                {groups.into_iter().map(|(kind, items)| view! {
                    <div>
                        <p class="font-medium">{kind.heading()}":"</p>
                        <ul>
                            {items.into_iter().map(|hit| view! {
                                <li><a href=hit.href>{hit.title}</a></li>
                            }).collect_view()}
                        </ul>
                    </div>
                }).collect_view()}
            </div>
        }.into_any(),
    };

    view! { <div class=class>{body}</div> }
}
