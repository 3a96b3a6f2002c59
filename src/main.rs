use chrono::NaiveDate;
use gloo_net::http::Request;
use serde::Deserialize;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

const API_BASE_URL: &str = "/api";

#[derive(Clone, PartialEq, Deserialize)]
struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, PartialEq, Deserialize)]
struct Transaction {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub amount: f64,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Clone, PartialEq, Deserialize)]
struct Budget {
    pub id: i64,
    #[serde(default)]
    pub category: Option<Category>,
    pub period: String,
    pub amount: f64,
    #[serde(default)]
    pub ai_generated: bool,
}

#[derive(Clone, PartialEq, Deserialize)]
struct Insight {
    pub title: String,
    pub detail: String,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Clone, PartialEq, Deserialize)]
struct CategorizeSummary {
    pub updated: i64,
    pub uncategorized: i64,
}

#[derive(Clone, PartialEq, Deserialize)]
struct ImportSummary {
    pub imported: i64,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    detail: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum QueryKey {
    Categories,
    Transactions,
    Budgets,
    Insights,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
struct Epochs {
    categories: u32,
    transactions: u32,
    budgets: u32,
    insights: u32,
}

impl Epochs {
    fn get(&self, key: QueryKey) -> u32 {
        match key {
            QueryKey::Categories => self.categories,
            QueryKey::Transactions => self.transactions,
            QueryKey::Budgets => self.budgets,
            QueryKey::Insights => self.insights,
        }
    }

    fn bumped(&self, keys: &[QueryKey]) -> Epochs {
        let mut next = *self;
        for key in keys {
            match key {
                QueryKey::Categories => next.categories = next.categories.wrapping_add(1),
                QueryKey::Transactions => next.transactions = next.transactions.wrapping_add(1),
                QueryKey::Budgets => next.budgets = next.budgets.wrapping_add(1),
                QueryKey::Insights => next.insights = next.insights.wrapping_add(1),
            }
        }
        next
    }
}

// Read queries marked stale by each action; a bumped epoch re-runs that fetch.
const CSV_IMPORT_INVALIDATES: [QueryKey; 2] = [QueryKey::Transactions, QueryKey::Categories];
const PLAID_IMPORT_INVALIDATES: [QueryKey; 1] = [QueryKey::Transactions];
const AUTO_CATEGORIZE_INVALIDATES: [QueryKey; 2] = [QueryKey::Transactions, QueryKey::Categories];
const AUTO_BUDGET_INVALIDATES: [QueryKey; 1] = [QueryKey::Budgets];

#[derive(Clone, PartialEq)]
struct QueryCache {
    epochs: UseStateHandle<Epochs>,
}

impl QueryCache {
    fn epoch(&self, key: QueryKey) -> u32 {
        self.epochs.get(key)
    }

    fn invalidate(&self, keys: &[QueryKey]) {
        self.epochs.set(self.epochs.bumped(keys));
    }
}

async fn fetch_list<T: serde::de::DeserializeOwned>(path: &str) -> Result<Vec<T>, String> {
    let url = format!("{}{}", API_BASE_URL, path);
    let resp = Request::get(&url)
        .send()
        .await
        .map_err(|_| "Could not reach the server.".to_string())?;
    if !resp.ok() {
        return Err(format!("Request failed with status {}.", resp.status()));
    }
    resp.json::<Vec<T>>()
        .await
        .map_err(|_| "Could not read the server response.".to_string())
}

async fn error_detail(resp: gloo_net::http::Response, fallback: &str) -> String {
    if let Ok(body) = resp.json::<ApiError>().await {
        if let Some(detail) = body.detail {
            return detail;
        }
    }
    fallback.to_string()
}

#[derive(Clone, Copy, PartialEq, Debug)]
struct Totals {
    income: f64,
    expenses: f64,
    net: f64,
}

fn compute_totals(transactions: &[Transaction]) -> Totals {
    let income: f64 = transactions
        .iter()
        .filter(|txn| txn.amount > 0.0)
        .map(|txn| txn.amount)
        .sum();
    let expenses: f64 = transactions
        .iter()
        .filter(|txn| txn.amount < 0.0)
        .map(|txn| txn.amount)
        .sum();
    Totals {
        income,
        expenses,
        net: income + expenses,
    }
}

fn format_with_commas(value: i64) -> String {
    let digits = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

fn format_amount(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as i64;
    format!("{}${}.{:02}", sign, format_with_commas(cents / 100), cents % 100)
}

fn format_date(raw: &str) -> String {
    let day = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn amount_class(amount: f64) -> &'static str {
    if amount >= 0.0 {
        "positive"
    } else {
        "negative"
    }
}

fn plaid_fields_missing(access_token: &str, start_date: &str, end_date: &str) -> bool {
    access_token.is_empty() || start_date.is_empty() || end_date.is_empty()
}

#[function_component(App)]
fn app() -> Html {
    let epochs = use_state(Epochs::default);
    let cache = QueryCache { epochs };

    html! {
        <div class="app-shell">
            <header class="app-header">
                <h1>{"Financial Tracking"}</h1>
                <nav>
                    <a href="/">{"Dashboard"}</a>
                </nav>
            </header>
            <main>
                <DashboardPage cache={cache} />
            </main>
            <footer class="app-footer">{"Built with FastAPI, Yew & AI assistance."}</footer>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct DashboardProps {
    cache: QueryCache,
}

#[function_component(DashboardPage)]
fn dashboard_page(props: &DashboardProps) -> Html {
    let cache = props.cache.clone();

    let categories = use_state(|| Vec::<Category>::new());
    let categories_error = use_state(|| None::<String>);
    let transactions = use_state(|| Vec::<Transaction>::new());
    let transactions_error = use_state(|| None::<String>);
    let budgets = use_state(|| Vec::<Budget>::new());
    let budgets_error = use_state(|| None::<String>);
    let insights = use_state(|| Vec::<Insight>::new());
    let insights_error = use_state(|| None::<String>);

    let categorizing = use_state(|| false);
    let categorize_summary = use_state(|| None::<CategorizeSummary>);
    let budgeting = use_state(|| false);
    let ai_error = use_state(|| None::<String>);

    // One effect per read query, re-run whenever its epoch changes.
    {
        let categories = categories.clone();
        let categories_error = categories_error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match fetch_list::<Category>("/categories").await {
                        Ok(list) => {
                            categories.set(list);
                            categories_error.set(None);
                        }
                        Err(err) => categories_error.set(Some(err)),
                    }
                });
                || ()
            },
            cache.epoch(QueryKey::Categories),
        );
    }

    {
        let transactions = transactions.clone();
        let transactions_error = transactions_error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match fetch_list::<Transaction>("/transactions").await {
                        Ok(list) => {
                            transactions.set(list);
                            transactions_error.set(None);
                        }
                        Err(err) => transactions_error.set(Some(err)),
                    }
                });
                || ()
            },
            cache.epoch(QueryKey::Transactions),
        );
    }

    {
        let budgets = budgets.clone();
        let budgets_error = budgets_error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match fetch_list::<Budget>("/budgets").await {
                        Ok(list) => {
                            budgets.set(list);
                            budgets_error.set(None);
                        }
                        Err(err) => budgets_error.set(Some(err)),
                    }
                });
                || ()
            },
            cache.epoch(QueryKey::Budgets),
        );
    }

    {
        let insights = insights.clone();
        let insights_error = insights_error.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match fetch_list::<Insight>("/insights").await {
                        Ok(list) => {
                            insights.set(list);
                            insights_error.set(None);
                        }
                        Err(err) => insights_error.set(Some(err)),
                    }
                });
                || ()
            },
            cache.epoch(QueryKey::Insights),
        );
    }

    let on_auto_categorize = {
        let cache = cache.clone();
        let categorizing = categorizing.clone();
        let categorize_summary = categorize_summary.clone();
        let ai_error = ai_error.clone();
        Callback::from(move |_| {
            let cache = cache.clone();
            let categorizing = categorizing.clone();
            let categorize_summary = categorize_summary.clone();
            let ai_error = ai_error.clone();

            categorizing.set(true);
            ai_error.set(None);

            spawn_local(async move {
                let url = format!("{}/transactions/auto-categorize", API_BASE_URL);
                match Request::post(&url).send().await {
                    Ok(resp) if resp.ok() => {
                        if let Ok(summary) = resp.json::<CategorizeSummary>().await {
                            categorize_summary.set(Some(summary));
                        }
                        cache.invalidate(&AUTO_CATEGORIZE_INVALIDATES);
                    }
                    Ok(resp) => {
                        let msg = error_detail(resp, "Auto-categorize failed.").await;
                        ai_error.set(Some(msg));
                    }
                    Err(_) => ai_error.set(Some("Auto-categorize failed.".to_string())),
                }
                categorizing.set(false);
            });
        })
    };

    let on_auto_budget = {
        let cache = cache.clone();
        let budgeting = budgeting.clone();
        let ai_error = ai_error.clone();
        Callback::from(move |_| {
            let cache = cache.clone();
            let budgeting = budgeting.clone();
            let ai_error = ai_error.clone();

            budgeting.set(true);
            ai_error.set(None);

            spawn_local(async move {
                let url = format!("{}/budgets/auto", API_BASE_URL);
                match Request::post(&url).send().await {
                    Ok(resp) if resp.ok() => cache.invalidate(&AUTO_BUDGET_INVALIDATES),
                    Ok(resp) => {
                        let msg = error_detail(resp, "Auto budget failed.").await;
                        ai_error.set(Some(msg));
                    }
                    Err(_) => ai_error.set(Some("Auto budget failed.".to_string())),
                }
                budgeting.set(false);
            });
        })
    };

    let on_csv_complete = {
        let cache = cache.clone();
        Callback::from(move |_| cache.invalidate(&CSV_IMPORT_INVALIDATES))
    };

    let on_plaid_complete = {
        let cache = cache.clone();
        Callback::from(move |_| cache.invalidate(&PLAID_IMPORT_INVALIDATES))
    };

    let totals = compute_totals(&transactions);

    html! {
        <div class="dashboard">
            <section class="grid stats">
                <div class="card">
                    <h2>{"Income"}</h2>
                    <p>{ format_amount(totals.income) }</p>
                </div>
                <div class="card">
                    <h2>{"Expenses"}</h2>
                    <p>{ format_amount(totals.expenses.abs()) }</p>
                </div>
                <div class={classes!("card", amount_class(totals.net))}>
                    <h2>{"Net"}</h2>
                    <p>{ format_amount(totals.net) }</p>
                </div>
                <div class="card">
                    <h2>{"Categories"}</h2>
                    <p>{ if categories_error.is_some() { "—".to_string() } else { categories.len().to_string() } }</p>
                </div>
            </section>

            <section class="actions">
                <UploadTransactions on_complete={on_csv_complete} />
                <PlaidImport on_complete={on_plaid_complete} />
                <div class="action-card">
                    <h3>{"AI Tools"}</h3>
                    <button onclick={on_auto_categorize} disabled={*categorizing}>
                        { if *categorizing { "Categorizing…" } else { "Auto-categorize" } }
                    </button>
                    <button onclick={on_auto_budget} disabled={*budgeting}>
                        { if *budgeting { "Generating…" } else { "Auto budget" } }
                    </button>
                    {
                        if let Some(summary) = &*categorize_summary {
                            html! {
                                <p>
                                    { format!("Updated {} transactions.", summary.updated) }
                                    { if summary.uncategorized > 0 {
                                        html! { <span>{ format!(" {} remaining uncategorized.", summary.uncategorized) }</span> }
                                    } else {
                                        html! {}
                                    } }
                                </p>
                            }
                        } else {
                            html! {}
                        }
                    }
                    { read_error(&*ai_error) }
                </div>
            </section>

            <section class="grid main">
                <div class="card wide">
                    <h2>{"Recent Transactions"}</h2>
                    { read_error(&*transactions_error) }
                    <TransactionsTable transactions={(*transactions).clone()} />
                </div>
                <div class="card">
                    <h2>{"Budgets"}</h2>
                    { read_error(&*budgets_error) }
                    <BudgetList budgets={(*budgets).clone()} />
                </div>
                <div class="card">
                    <h2>{"Insights"}</h2>
                    { read_error(&*insights_error) }
                    <InsightsPanel insights={(*insights).clone()} />
                </div>
            </section>
        </div>
    }
}

fn read_error(error: &Option<String>) -> Html {
    match error {
        Some(msg) => html! { <p class="status error">{ msg.clone() }</p> },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
struct UploadTransactionsProps {
    on_complete: Callback<()>,
}

#[function_component(UploadTransactions)]
fn upload_transactions(props: &UploadTransactionsProps) -> Html {
    let uploading = use_state(|| false);
    let message = use_state(|| None::<String>);

    let on_file_change = {
        let uploading = uploading.clone();
        let message = message.clone();
        let on_complete = props.on_complete.clone();
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            let file = match input.files().and_then(|files| files.get(0)) {
                Some(file) => file,
                None => return,
            };

            let form = match web_sys::FormData::new() {
                Ok(form) => form,
                Err(_) => return,
            };
            if form.append_with_blob("file", &file).is_err() {
                return;
            }

            let uploading = uploading.clone();
            let message = message.clone();
            let on_complete = on_complete.clone();

            uploading.set(true);
            message.set(None);

            spawn_local(async move {
                let url = format!("{}/transactions/import/csv", API_BASE_URL);
                // Content-Type stays unset so the browser adds the multipart boundary.
                let request = match Request::post(&url).body(form) {
                    Ok(request) => request,
                    Err(_) => {
                        message.set(Some("Failed to import file.".to_string()));
                        uploading.set(false);
                        return;
                    }
                };

                match request.send().await {
                    Ok(resp) if resp.ok() => match resp.json::<ImportSummary>().await {
                        Ok(summary) => {
                            message.set(Some(format!("Imported {} transactions.", summary.imported)));
                            on_complete.emit(());
                        }
                        Err(_) => message.set(Some("Failed to import file.".to_string())),
                    },
                    Ok(resp) => {
                        let msg = error_detail(resp, "Failed to import file.").await;
                        message.set(Some(msg));
                    }
                    Err(_) => message.set(Some("Failed to import file.".to_string())),
                }
                uploading.set(false);
            });
        })
    };

    html! {
        <div class="action-card">
            <h3>{"Upload Transactions"}</h3>
            <p>{"Drop a CSV exported from your bank (Chase, Amex, Citi, Venmo, etc.)."}</p>
            <label class="upload">
                <input type="file" accept=".csv" onchange={on_file_change} disabled={*uploading} />
                <span>{ if *uploading { "Uploading…" } else { "Choose File" } }</span>
            </label>
            {
                if let Some(msg) = &*message {
                    html! { <p class="status">{ msg.clone() }</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PlaidImportProps {
    on_complete: Callback<()>,
}

#[function_component(PlaidImport)]
fn plaid_import(props: &PlaidImportProps) -> Html {
    let access_token = use_state(|| "".to_string());
    let start_date = use_state(|| "".to_string());
    let end_date = use_state(|| "".to_string());
    let status = use_state(|| None::<String>);
    let syncing = use_state(|| false);

    let on_submit = {
        let access_token = access_token.clone();
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        let status = status.clone();
        let syncing = syncing.clone();
        let on_complete = props.on_complete.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let token_val = (*access_token).clone();
            let start_val = (*start_date).clone();
            let end_val = (*end_date).clone();

            if plaid_fields_missing(&token_val, &start_val, &end_val) {
                status.set(Some("Fill in all Plaid details.".to_string()));
                return;
            }

            syncing.set(true);
            status.set(None);

            let status = status.clone();
            let syncing = syncing.clone();
            let on_complete = on_complete.clone();

            spawn_local(async move {
                let url = format!("{}/transactions/import/plaid", API_BASE_URL);
                let payload = serde_json::json!({
                    "access_token": token_val,
                    "start_date": start_val,
                    "end_date": end_val,
                });

                let request = match Request::post(&url).json(&payload) {
                    Ok(request) => request,
                    Err(_) => {
                        status.set(Some("Plaid import failed.".to_string()));
                        syncing.set(false);
                        return;
                    }
                };

                match request.send().await {
                    Ok(resp) if resp.ok() => match resp.json::<ImportSummary>().await {
                        Ok(summary) => {
                            status.set(Some(format!(
                                "Imported {} transactions from Plaid.",
                                summary.imported
                            )));
                            on_complete.emit(());
                        }
                        Err(_) => status.set(Some("Plaid import failed.".to_string())),
                    },
                    Ok(resp) => {
                        let msg = error_detail(resp, "Plaid import failed.").await;
                        status.set(Some(msg));
                    }
                    Err(_) => status.set(Some("Plaid import failed.".to_string())),
                }
                syncing.set(false);
            });
        })
    };

    html! {
        <div class="action-card">
            <h3>{"Plaid Import"}</h3>
            <p>{"Provide an access token to pull transactions from linked Plaid accounts."}</p>
            <form onsubmit={on_submit}>
                <input
                    placeholder="Access token"
                    value={(*access_token).clone()}
                    oninput={{
                        let access_token = access_token.clone();
                        Callback::from(move |e: InputEvent| {
                            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                            access_token.set(input.value());
                        })
                    }}
                />
                <div class="date-range">
                    <input
                        type="date"
                        value={(*start_date).clone()}
                        oninput={{
                            let start_date = start_date.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                start_date.set(input.value());
                            })
                        }}
                    />
                    <input
                        type="date"
                        value={(*end_date).clone()}
                        oninput={{
                            let end_date = end_date.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                end_date.set(input.value());
                            })
                        }}
                    />
                </div>
                <button type="submit" disabled={*syncing}>
                    { if *syncing { "Syncing…" } else { "Sync with Plaid" } }
                </button>
            </form>
            {
                if let Some(msg) = &*status {
                    html! { <p class="status">{ msg.clone() }</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

const NO_TRANSACTIONS_MESSAGE: &str = "No transactions yet. Import a CSV or connect via Plaid.";
const NO_BUDGETS_MESSAGE: &str = "No budgets configured yet. Try generating them with AI.";
const NO_INSIGHTS_MESSAGE: &str = "No insights yet. Import transactions to get AI-driven suggestions.";

#[derive(Properties, PartialEq)]
struct TransactionsTableProps {
    transactions: Vec<Transaction>,
}

#[function_component(TransactionsTable)]
fn transactions_table(props: &TransactionsTableProps) -> Html {
    if props.transactions.is_empty() {
        return html! { <p>{ NO_TRANSACTIONS_MESSAGE }</p> };
    }

    html! {
        <div class="table-wrapper">
            <table>
                <thead>
                    <tr>
                        <th>{"Date"}</th>
                        <th>{"Description"}</th>
                        <th>{"Category"}</th>
                        <th>{"Account"}</th>
                        <th>{"Amount"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for props.transactions.iter().map(|txn| {
                        let category = txn
                            .category
                            .as_ref()
                            .map(|c| c.name.clone())
                            .unwrap_or_else(|| "—".to_string());
                        let account = txn
                            .account_name
                            .clone()
                            .or_else(|| txn.source.clone())
                            .unwrap_or_else(|| "—".to_string());
                        html! {
                            <tr key={txn.id}>
                                <td>{ format_date(&txn.date) }</td>
                                <td>{ &txn.description }</td>
                                <td>{ category }</td>
                                <td>{ account }</td>
                                <td class={amount_class(txn.amount)}>{ format_amount(txn.amount) }</td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct BudgetListProps {
    budgets: Vec<Budget>,
}

#[function_component(BudgetList)]
fn budget_list(props: &BudgetListProps) -> Html {
    if props.budgets.is_empty() {
        return html! { <p>{ NO_BUDGETS_MESSAGE }</p> };
    }

    html! {
        <ul class="budget-list">
            { for props.budgets.iter().map(|budget| {
                let category = budget
                    .category
                    .as_ref()
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "Uncategorized".to_string());
                html! {
                    <li key={budget.id}>
                        <div>
                            <strong>{ category }</strong>
                            <span>{ &budget.period }</span>
                        </div>
                        <div>
                            <span>{ format_amount(budget.amount) }</span>
                            { if budget.ai_generated {
                                html! { <small>{"AI"}</small> }
                            } else {
                                html! {}
                            } }
                        </div>
                    </li>
                }
            }) }
        </ul>
    }
}

#[derive(Properties, PartialEq)]
struct InsightsPanelProps {
    insights: Vec<Insight>,
}

#[function_component(InsightsPanel)]
fn insights_panel(props: &InsightsPanelProps) -> Html {
    if props.insights.is_empty() {
        return html! { <p>{ NO_INSIGHTS_MESSAGE }</p> };
    }

    html! {
        <ul class="insights">
            { for props.insights.iter().enumerate().map(|(idx, insight)| html! {
                <li key={idx}>
                    <h4>{ &insight.title }</h4>
                    <p>{ &insight.detail }</p>
                    { if let Some(action) = &insight.action {
                        html! { <span>{ action.clone() }</span> }
                    } else {
                        html! {}
                    } }
                </li>
            }) }
        </ul>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(id: i64, amount: f64) -> Transaction {
        Transaction {
            id,
            date: "2024-03-05".to_string(),
            description: "Coffee".to_string(),
            amount,
            category: None,
            account_name: None,
            source: None,
        }
    }

    fn render<C>(props: C::Properties) -> String
    where
        C: yew::html::BaseComponent,
    {
        futures::executor::block_on(yew::LocalServerRenderer::<C>::with_props(props).render())
    }

    #[test]
    fn totals_split_income_and_expenses() {
        let txns = vec![transaction(1, 100.0), transaction(2, -40.0)];
        let totals = compute_totals(&txns);
        assert_eq!(totals.income, 100.0);
        assert_eq!(totals.expenses, -40.0);
        assert_eq!(totals.net, 60.0);
    }

    #[test]
    fn totals_of_no_transactions_are_zero() {
        let totals = compute_totals(&[]);
        assert_eq!(totals.income, 0.0);
        assert_eq!(totals.expenses, 0.0);
        assert_eq!(totals.net, 0.0);
    }

    #[test]
    fn amount_sign_selects_style_class() {
        assert_eq!(amount_class(100.0), "positive");
        assert_eq!(amount_class(0.0), "positive");
        assert_eq!(amount_class(-0.01), "negative");
    }

    #[test]
    fn amounts_format_as_dollars() {
        assert_eq!(format_amount(0.0), "$0.00");
        assert_eq!(format_amount(1234.5), "$1,234.50");
        assert_eq!(format_amount(-40.0), "-$40.00");
    }

    #[test]
    fn dates_format_for_display() {
        assert_eq!(format_date("2024-03-05"), "Mar 5, 2024");
        assert_eq!(format_date("2024-12-31T08:30:00"), "Dec 31, 2024");
        assert_eq!(format_date("soon"), "soon");
    }

    #[test]
    fn plaid_submit_requires_every_field() {
        assert!(plaid_fields_missing("", "2024-01-01", "2024-02-01"));
        assert!(plaid_fields_missing("token", "", "2024-02-01"));
        assert!(plaid_fields_missing("token", "2024-01-01", ""));
        assert!(!plaid_fields_missing("token", "2024-01-01", "2024-02-01"));
    }

    #[test]
    fn csv_import_invalidates_transactions_and_categories() {
        let next = Epochs::default().bumped(&CSV_IMPORT_INVALIDATES);
        assert_eq!(next.get(QueryKey::Transactions), 1);
        assert_eq!(next.get(QueryKey::Categories), 1);
        assert_eq!(next.get(QueryKey::Budgets), 0);
        assert_eq!(next.get(QueryKey::Insights), 0);
    }

    #[test]
    fn plaid_import_invalidates_only_transactions() {
        let next = Epochs::default().bumped(&PLAID_IMPORT_INVALIDATES);
        assert_eq!(next.get(QueryKey::Transactions), 1);
        assert_eq!(next.get(QueryKey::Categories), 0);
        assert_eq!(next.get(QueryKey::Budgets), 0);
        assert_eq!(next.get(QueryKey::Insights), 0);
    }

    #[test]
    fn ai_actions_invalidate_their_reads() {
        let next = Epochs::default().bumped(&AUTO_CATEGORIZE_INVALIDATES);
        assert_eq!(next.get(QueryKey::Transactions), 1);
        assert_eq!(next.get(QueryKey::Categories), 1);
        assert_eq!(next.get(QueryKey::Insights), 0);

        let next = Epochs::default().bumped(&AUTO_BUDGET_INVALIDATES);
        assert_eq!(next.get(QueryKey::Budgets), 1);
        assert_eq!(next.get(QueryKey::Transactions), 0);
    }

    #[test]
    fn empty_transactions_render_empty_state() {
        let html = render::<TransactionsTable>(TransactionsTableProps {
            transactions: vec![],
        });
        assert!(html.contains(NO_TRANSACTIONS_MESSAGE));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn transactions_color_amounts_by_sign() {
        let html = render::<TransactionsTable>(TransactionsTableProps {
            transactions: vec![transaction(1, 100.0), transaction(2, -40.0)],
        });
        assert!(html.contains("class=\"positive\""));
        assert!(html.contains("class=\"negative\""));
        assert!(html.contains("-$40.00"));
    }

    #[test]
    fn transactions_fall_back_to_em_dash() {
        let html = render::<TransactionsTable>(TransactionsTableProps {
            transactions: vec![transaction(1, 12.0)],
        });
        assert!(html.contains("—"));
        assert!(html.contains("Mar 5, 2024"));
    }

    #[test]
    fn empty_budgets_render_empty_state() {
        let html = render::<BudgetList>(BudgetListProps { budgets: vec![] });
        assert!(html.contains(NO_BUDGETS_MESSAGE));
        assert!(!html.contains("<ul"));
    }

    #[test]
    fn budgets_render_rows_with_fallback_and_marker() {
        let budgets = vec![
            Budget {
                id: 1,
                category: Some(Category {
                    id: 9,
                    name: "Dining".to_string(),
                }),
                period: "monthly".to_string(),
                amount: 250.0,
                ai_generated: true,
            },
            Budget {
                id: 2,
                category: None,
                period: "monthly".to_string(),
                amount: 80.0,
                ai_generated: false,
            },
        ];
        let html = render::<BudgetList>(BudgetListProps { budgets });
        assert!(html.contains("Dining"));
        assert!(html.contains("Uncategorized"));
        assert!(html.contains("$250.00"));
        assert!(html.contains("<small>AI</small>"));
    }

    #[test]
    fn budgets_without_ai_flag_have_no_marker() {
        let budgets = vec![Budget {
            id: 2,
            category: None,
            period: "weekly".to_string(),
            amount: 80.0,
            ai_generated: false,
        }];
        let html = render::<BudgetList>(BudgetListProps { budgets });
        assert!(!html.contains("<small>"));
    }

    #[test]
    fn empty_insights_render_empty_state() {
        let html = render::<InsightsPanel>(InsightsPanelProps { insights: vec![] });
        assert!(html.contains(NO_INSIGHTS_MESSAGE));
    }

    #[test]
    fn insights_render_entries() {
        let insights = vec![Insight {
            title: "Dining up 20%".to_string(),
            detail: "You spent more on dining this month.".to_string(),
            action: Some("Set a dining budget".to_string()),
        }];
        let html = render::<InsightsPanel>(InsightsPanelProps { insights });
        assert!(html.contains("Dining up 20%"));
        assert!(html.contains("You spent more on dining this month."));
        assert!(html.contains("Set a dining budget"));
    }

    #[test]
    fn upload_card_offers_file_picker() {
        let html = render::<UploadTransactions>(UploadTransactionsProps {
            on_complete: Callback::noop(),
        });
        assert!(html.contains("Upload Transactions"));
        assert!(html.contains("Choose File"));
    }

    #[test]
    fn plaid_card_renders_form() {
        let html = render::<PlaidImport>(PlaidImportProps {
            on_complete: Callback::noop(),
        });
        assert!(html.contains("Plaid Import"));
        assert!(html.contains("Access token"));
        assert!(html.contains("Sync with Plaid"));
    }
}
