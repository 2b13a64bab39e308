//! Server-rendered pages
//!
//! Every page is inline HTML with a small script that talks to the JSON
//! routes. Static CSS and JS live in consts and are spliced in as format
//! arguments, so only the dynamic fragments need brace escaping.

use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::db::analytics::{AnalyticsQuery, ChartData};
use crate::AppState;

/// Shared dark-theme styles
const PAGE_CSS: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #1a1a1a; color: #e0e0e0; line-height: 1.6; }
        header { background-color: #2a2a2a; border-bottom: 1px solid #3a3a3a; padding: 20px; margin-bottom: 20px; }
        .header-content { display: flex; justify-content: space-between; align-items: center; max-width: 1100px; }
        .header-right { text-align: right; font-size: 13px; color: #888; font-family: 'Courier New', monospace; line-height: 1.4; }
        h1 { font-size: 26px; margin-bottom: 4px; color: #4a9eff; }
        h2 { font-size: 20px; margin-bottom: 10px; }
        .subtitle { color: #888; font-size: 15px; }
        nav { padding: 0 20px 14px 20px; }
        nav a { color: #4a9eff; text-decoration: none; margin-right: 18px; font-weight: 600; }
        nav a:hover { text-decoration: underline; }
        .content { padding: 0 20px 30px 20px; max-width: 1100px; }
        select, input, button { background: #2a2a2a; color: #e0e0e0; border: 1px solid #3a3a3a; border-radius: 4px; padding: 8px 10px; margin: 4px 6px 4px 0; font-size: 14px; }
        button { background: #4a9eff; color: #fff; border: none; cursor: pointer; font-weight: 600; }
        button:hover { background: #3a8eef; }
        button.secondary { background: #3a3a3a; }
        table { border-collapse: collapse; width: 100%; margin-top: 15px; }
        th, td { border-bottom: 1px solid #3a3a3a; padding: 8px 10px; text-align: left; vertical-align: top; }
        th { color: #4a9eff; }
        .pager { margin-top: 15px; }
        .pager span { color: #888; margin: 0 10px; }
        .status { margin: 10px 0; color: #10b981; min-height: 22px; }
"#;

/// Page skeleton shared by every route
fn page_shell(title: &str, subtitle: &str, content: &str) -> Html<String> {
    let css = PAGE_CSS;
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = env!("GIT_HASH");
    let build_profile = env!("BUILD_PROFILE");
    let build_timestamp = env!("BUILD_TIMESTAMP");

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <header>
        <div class="header-content">
            <div>
                <h1>{title}</h1>
                <p class="subtitle">{subtitle}</p>
            </div>
            <div class="header-right">
                <div>mealprep-web v{version}</div>
                <div>{git_hash} ({build_profile})</div>
                <div>{build_timestamp}</div>
            </div>
        </div>
    </header>
    <nav>
        <a href="/">Dashboard</a>
        <a href="/search-page">Search Recipes</a>
        <a href="/meal-planner">Meal Planner</a>
        <a href="/favorites-page">Favorites</a>
    </nav>
    <div class="content">
{content}
    </div>
</body>
</html>"#
    ))
}

/// Chart rendering, shared by the empty and populated dashboard states
const RENDER_SCRIPT: &str = r#"
        if (chartData && chartData.labels.length > 0) {
            new Chart(document.getElementById('chart'), {
                type: 'bar',
                data: chartData,
                options: {
                    plugins: {
                        legend: { display: false },
                        title: { display: true, text: chartData.datasets[0].label },
                        tooltip: {
                            callbacks: {
                                afterLabel: (item) => {
                                    const names = item.dataset.recipeNames;
                                    if (names && names[item.dataIndex]) {
                                        return 'Recipes: ' + names[item.dataIndex];
                                    }
                                    return '';
                                }
                            }
                        }
                    },
                    scales: { y: { beginAtZero: true } }
                }
            });
        }
"#;

/// Render the dashboard, optionally with a chart payload.
///
/// `chart` of None means no query has run yet; the page then renders with a
/// null payload and the canvas stays empty.
pub fn dashboard_page(selected: Option<AnalyticsQuery>, chart: Option<&ChartData>) -> Html<String> {
    let chart_json = match chart {
        Some(chart) => serde_json::to_string(chart).unwrap_or_else(|_| "null".to_string()),
        None => "null".to_string(),
    };

    let options: String = AnalyticsQuery::ALL
        .iter()
        .map(|query| {
            let marker = if selected == Some(*query) { " selected" } else { "" };
            format!(
                "            <option value=\"{}\"{}>{}</option>\n",
                query.id(),
                marker,
                query.title()
            )
        })
        .collect();

    let render_script = RENDER_SCRIPT;
    let content = format!(
        r#"    <h2>Recipe Analytics</h2>
    <p>Pick a question and the chart reloads with live data.</p>
    <form action="/query" method="get">
        <select name="query" onchange="this.form.submit()">
            <option value="">Choose a chart...</option>
{options}        </select>
        <noscript><button type="submit">Show</button></noscript>
    </form>
    <div style="max-width: 900px; margin-top: 20px;">
        <canvas id="chart"></canvas>
    </div>
    <script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
    <script>
        const chartData = {chart_json};
{render_script}
    </script>
"#
    );

    page_shell("Recipe Dashboard", "Charts over the recipe database", &content)
}

/// GET /
pub async fn home_page() -> Html<String> {
    dashboard_page(None, None)
}

const SEARCH_SCRIPT: &str = r#"
        let page = 1;

        async function loadFilters() {
            const res = await fetch('/filters');
            const data = await res.json();
            fillSelect('tag', data.tags);
            fillSelect('searchTerm', data.search_terms);
            fillSelect('ingredient', data.ingredients);
        }

        function fillSelect(id, values) {
            const select = document.getElementById(id);
            for (const value of values) {
                const option = document.createElement('option');
                option.value = value;
                option.textContent = value;
                select.appendChild(option);
            }
        }

        async function runSearch() {
            const params = new URLSearchParams({
                tag: document.getElementById('tag').value,
                searchTerm: document.getElementById('searchTerm').value,
                ingredient: document.getElementById('ingredient').value,
                sort: document.getElementById('sort').value,
                page: page,
            });
            const res = await fetch('/search?' + params);
            const data = await res.json();
            const tbody = document.getElementById('results');
            tbody.innerHTML = '';
            for (const recipe of data.recipes) {
                const row = document.createElement('tr');
                row.innerHTML =
                    '<td>' + recipe.name + '</td>' +
                    '<td>' + (recipe.description || '') + '</td>' +
                    '<td>' + (recipe.servings ?? '') + '</td>' +
                    '<td>' + (recipe.ingredients || '') + '</td>' +
                    '<td><button onclick="addFavorite(' + recipe.recipe_id + ')">Favorite</button></td>';
                tbody.appendChild(row);
            }
            page = data.page;
            document.getElementById('page-info').textContent =
                'Page ' + data.page + ' of ' + Math.max(data.total_pages, 1) +
                ' (' + data.total_results + ' recipes)';
        }

        async function addFavorite(recipeId) {
            const res = await fetch('/favorites/add', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ recipe_id: recipeId }),
            });
            const data = await res.json();
            document.getElementById('status').textContent = data.message;
        }

        function newSearch() { page = 1; runSearch(); }
        function prevPage() { if (page > 1) { page -= 1; runSearch(); } }
        function nextPage() { page += 1; runSearch(); }

        loadFilters().then(runSearch);
"#;

/// GET /search-page
pub async fn search_page() -> Html<String> {
    let content = format!(
        r#"    <h2>Search &amp; Filter</h2>
    <div>
        <select id="tag"><option value="">Any tag</option></select>
        <select id="searchTerm"><option value="">Any search term</option></select>
        <select id="ingredient"><option value="">Any ingredient</option></select>
        <select id="sort">
            <option value="">No sorting</option>
            <option value="alphabetical">Name (A-Z)</option>
            <option value="servings">Servings (high to low)</option>
        </select>
        <button onclick="newSearch()">Search</button>
    </div>
    <p class="status" id="status"></p>
    <table>
        <thead><tr><th>Name</th><th>Description</th><th>Servings</th><th>Ingredients</th><th></th></tr></thead>
        <tbody id="results"></tbody>
    </table>
    <div class="pager">
        <button class="secondary" onclick="prevPage()">Previous</button>
        <span id="page-info"></span>
        <button class="secondary" onclick="nextPage()">Next</button>
    </div>
    <script>{script}</script>
"#,
        script = SEARCH_SCRIPT,
    );

    page_shell("Search Recipes", "Filter by tag, search term, or ingredient", &content)
}

const MEAL_PLANNER_SCRIPT: &str = r#"
        async function loadRecipes() {
            const select = document.getElementById('recipe');
            let page = 1;
            let totalPages = 1;
            do {
                const res = await fetch('/search?' + new URLSearchParams({ sort: 'alphabetical', page: page }));
                const data = await res.json();
                for (const recipe of data.recipes) {
                    const option = document.createElement('option');
                    option.value = recipe.recipe_id;
                    option.textContent = recipe.name;
                    select.appendChild(option);
                }
                totalPages = data.total_pages;
                page += 1;
            } while (page <= totalPages);
        }

        async function loadPlan() {
            const res = await fetch('/meal-planner/fetch');
            const data = await res.json();
            const tbody = document.getElementById('plan');
            tbody.innerHTML = '';
            for (const entry of data.meal_plan) {
                const row = document.createElement('tr');
                row.innerHTML =
                    '<td>' + entry.day + '</td>' +
                    '<td>' + entry.meal_type + '</td>' +
                    '<td>' + entry.recipe_name + '</td>';
                tbody.appendChild(row);
            }
        }

        async function saveMeal() {
            const res = await fetch('/meal-planner/save', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({
                    day: document.getElementById('day').value,
                    meal: document.getElementById('meal').value,
                    recipeId: Number(document.getElementById('recipe').value),
                }),
            });
            const data = await res.json();
            document.getElementById('status').textContent = data.message;
            loadPlan();
        }

        async function clearPlan() {
            const res = await fetch('/meal-planner/clear', { method: 'POST' });
            const data = await res.json();
            document.getElementById('status').textContent = data.message;
            loadPlan();
        }

        loadRecipes();
        loadPlan();
"#;

/// GET /meal-planner
pub async fn meal_planner_page() -> Html<String> {
    let content = format!(
        r#"    <h2>Plan Your Week</h2>
    <div>
        <select id="day">
            <option>Monday</option>
            <option>Tuesday</option>
            <option>Wednesday</option>
            <option>Thursday</option>
            <option>Friday</option>
            <option>Saturday</option>
            <option>Sunday</option>
        </select>
        <select id="meal">
            <option>Breakfast</option>
            <option>Lunch</option>
            <option>Dinner</option>
        </select>
        <select id="recipe"></select>
        <button onclick="saveMeal()">Save</button>
        <button class="secondary" onclick="clearPlan()">Clear Plan</button>
    </div>
    <p class="status" id="status"></p>
    <table>
        <thead><tr><th>Day</th><th>Meal</th><th>Recipe</th></tr></thead>
        <tbody id="plan"></tbody>
    </table>
    <script>{script}</script>
"#,
        script = MEAL_PLANNER_SCRIPT,
    );

    page_shell("Meal Planner", "One recipe per day and meal slot", &content)
}

const FAVORITES_SCRIPT: &str = r#"
        let page = 1;

        async function loadFilters() {
            const res = await fetch('/filters');
            const data = await res.json();
            fillSelect('tag', data.tags);
            fillSelect('searchTerm', data.search_terms);
            fillSelect('ingredient', data.ingredients);
        }

        function fillSelect(id, values) {
            const select = document.getElementById(id);
            for (const value of values) {
                const option = document.createElement('option');
                option.value = value;
                option.textContent = value;
                select.appendChild(option);
            }
        }

        async function loadFavorites() {
            const params = new URLSearchParams({
                tag: document.getElementById('tag').value,
                searchTerm: document.getElementById('searchTerm').value,
                ingredient: document.getElementById('ingredient').value,
                sort: document.getElementById('sort').value,
                page: page,
            });
            const res = await fetch('/favorites?' + params);
            const data = await res.json();
            const tbody = document.getElementById('results');
            tbody.innerHTML = '';
            for (const recipe of data.recipes) {
                const row = document.createElement('tr');
                row.innerHTML =
                    '<td>' + recipe.name + '</td>' +
                    '<td>' + (recipe.description || '') + '</td>' +
                    '<td>' + (recipe.ingredients || '') + '</td>' +
                    '<td><button onclick="removeFavorite(' + recipe.recipe_id + ')">Remove</button></td>';
                tbody.appendChild(row);
            }
            page = data.page;
            document.getElementById('page-info').textContent =
                'Page ' + data.page + ' of ' + Math.max(data.total_pages, 1) +
                ' (' + data.total_results + ' favorites)';
        }

        async function removeFavorite(recipeId) {
            const res = await fetch('/favorites/remove', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ recipe_id: recipeId }),
            });
            const data = await res.json();
            document.getElementById('status').textContent = data.message;
            loadFavorites();
        }

        function newSearch() { page = 1; loadFavorites(); }
        function prevPage() { if (page > 1) { page -= 1; loadFavorites(); } }
        function nextPage() { page += 1; loadFavorites(); }

        loadFilters().then(loadFavorites);
"#;

/// GET /favorites-page
pub async fn favorites_page() -> Html<String> {
    let content = format!(
        r#"    <h2>Your Favorites</h2>
    <div>
        <select id="tag"><option value="">Any tag</option></select>
        <select id="searchTerm"><option value="">Any search term</option></select>
        <select id="ingredient"><option value="">Any ingredient</option></select>
        <select id="sort">
            <option value="">No sorting</option>
            <option value="alphabetical">Name (A-Z)</option>
            <option value="servings">Servings (high to low)</option>
        </select>
        <button onclick="newSearch()">Apply</button>
    </div>
    <p class="status" id="status"></p>
    <table>
        <thead><tr><th>Name</th><th>Description</th><th>Ingredients</th><th></th></tr></thead>
        <tbody id="results"></tbody>
    </table>
    <div class="pager">
        <button class="secondary" onclick="prevPage()">Previous</button>
        <span id="page-info"></span>
        <button class="secondary" onclick="nextPage()">Next</button>
    </div>
    <script>{script}</script>
"#,
        script = FAVORITES_SCRIPT,
    );

    page_shell("Favorites", "Recipes you have bookmarked", &content)
}

/// Build page routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_page))
        .route("/search-page", get(search_page))
        .route("/meal-planner", get(meal_planner_page))
        .route("/favorites-page", get(favorites_page))
}
