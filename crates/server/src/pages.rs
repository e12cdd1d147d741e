//! Static admin pages and the API description document.

use serde_json::{json, Value};

pub(crate) const API_VERSION: &str = "1.0.0";
pub(crate) const SERVICE_NAME: &str = "Arshad Anwar Portfolio Backend API";

const TOKEN_KEY: &str = "adminToken";

pub(crate) fn api_docs() -> Value {
    let bearer = json!({ "Authorization": "Bearer <token>" });
    json!({
        "title": "Arshad Anwar Portfolio API",
        "version": API_VERSION,
        "description": "Backend API for portfolio contact form and admin panel",
        "endpoints": {
            "contact_form": {
                "url": "/api/submit-contact",
                "method": "POST",
                "description": "Submit contact form",
                "body": {
                    "name": "string (required)",
                    "email": "string (required)",
                    "service": "string (required)",
                    "message": "string (required, min 10 chars)"
                }
            },
            "admin_login": {
                "url": "/api/admin/login",
                "method": "POST",
                "description": "Admin login",
                "body": {
                    "username": "string (required)",
                    "password": "string (required)"
                }
            },
            "get_submissions": {
                "url": "/api/admin/submissions",
                "method": "GET",
                "description": "Get contact submissions (Admin only)",
                "headers": bearer.clone(),
                "query_params": {
                    "page": "int (optional, default: 1)",
                    "per_page": "int (optional, default: 20)",
                    "is_read": "boolean (optional)"
                }
            },
            "get_submission": {
                "url": "/api/admin/submissions/<id>",
                "method": "GET",
                "description": "Get one submission and mark it read (Admin only)",
                "headers": bearer.clone()
            },
            "delete_submission": {
                "url": "/api/admin/submissions/<id>",
                "method": "DELETE",
                "description": "Delete a submission (Admin only)",
                "headers": bearer.clone()
            },
            "mark_read": {
                "url": "/api/admin/submissions/<id>/mark-read",
                "method": "PATCH",
                "description": "Mark a submission read or unread (Admin only)",
                "headers": bearer.clone(),
                "body": { "is_read": "boolean (optional, default: true)" }
            },
            "admin_stats": {
                "url": "/api/admin/stats",
                "method": "GET",
                "description": "Get admin dashboard statistics",
                "headers": bearer.clone()
            },
            "admin_profile": {
                "url": "/api/admin/profile",
                "method": "GET",
                "description": "Get the authenticated admin",
                "headers": bearer
            }
        }
    })
}

pub(crate) fn admin_login_page() -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>Admin Login</title>\n</head>\n",
            "<body class=\"min-h-screen bg-slate-950 text-white flex items-center justify-center\">\n",
            "<form id=\"admin-login-form\" class=\"w-full max-w-sm space-y-4 p-8 rounded-xl bg-slate-900\">\n",
            "<h1 class=\"text-2xl font-bold\">Admin Login</h1>\n",
            "<input id=\"username\" name=\"username\" autocomplete=\"username\" placeholder=\"Username\" required>\n",
            "<input id=\"password\" name=\"password\" type=\"password\" autocomplete=\"current-password\" placeholder=\"Password\" required>\n",
            "<p id=\"login-error\" class=\"text-red-400\" hidden></p>\n",
            "<button type=\"submit\">Sign in</button>\n",
            "</form>\n<script>\n",
            "document.getElementById('admin-login-form').addEventListener('submit', async (event) => {{\n",
            "  event.preventDefault();\n",
            "  const error = document.getElementById('login-error');\n",
            "  error.hidden = true;\n",
            "  const body = {{\n",
            "    username: document.getElementById('username').value,\n",
            "    password: document.getElementById('password').value,\n",
            "  }};\n",
            "  try {{\n",
            "    const response = await fetch('/api/admin/login', {{\n",
            "      method: 'POST',\n",
            "      headers: {{ 'Content-Type': 'application/json' }},\n",
            "      body: JSON.stringify(body),\n",
            "    }});\n",
            "    const result = await response.json();\n",
            "    if (response.ok && result.success) {{\n",
            "      localStorage.setItem('{token_key}', result.token);\n",
            "      window.location.href = '/admin';\n",
            "      return;\n",
            "    }}\n",
            "    error.textContent = result.error || 'Login failed';\n",
            "  }} catch (_) {{\n",
            "    error.textContent = 'Network error. Please try again.';\n",
            "  }}\n",
            "  error.hidden = false;\n",
            "}});\n",
            "</script>\n</body>\n</html>\n",
        ),
        token_key = TOKEN_KEY,
    )
}

pub(crate) fn admin_dashboard_page() -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>Admin Dashboard</title>\n</head>\n",
            "<body class=\"min-h-screen bg-slate-950 text-white p-8\">\n",
            "<header class=\"flex justify-between items-center\">\n",
            "<h1 class=\"text-2xl font-bold\">Contact Submissions</h1>\n",
            "<span id=\"admin-name\"></span>\n",
            "<button id=\"logout\" type=\"button\">Log out</button>\n",
            "</header>\n",
            "<section id=\"stats\" class=\"grid grid-cols-3 gap-4 my-6\">\n",
            "<div>Total <strong id=\"stat-total\">-</strong></div>\n",
            "<div>Unread <strong id=\"stat-unread\">-</strong></div>\n",
            "<div>Last 7 days <strong id=\"stat-recent\">-</strong></div>\n",
            "</section>\n",
            "<label><input id=\"unread-only\" type=\"checkbox\"> Unread only</label>\n",
            "<table class=\"w-full mt-4\">\n",
            "<thead><tr><th>Received</th><th>Name</th><th>Email</th><th>Service</th><th>Message</th><th></th></tr></thead>\n",
            "<tbody id=\"submissions\"></tbody>\n",
            "</table>\n",
            "<nav class=\"flex gap-4 mt-4\">\n",
            "<button id=\"prev-page\" type=\"button\">Previous</button>\n",
            "<span id=\"page-info\"></span>\n",
            "<button id=\"next-page\" type=\"button\">Next</button>\n",
            "</nav>\n<script>\n",
            "const token = localStorage.getItem('{token_key}');\n",
            "if (!token) window.location.href = '/admin/login';\n",
            "let page = 1;\n",
            "const text = (value) => document.createTextNode(value == null ? '' : String(value));\n",
            "async function api(path, options = {{}}) {{\n",
            "  const response = await fetch(path, {{\n",
            "    ...options,\n",
            "    headers: {{ 'Content-Type': 'application/json', Authorization: 'Bearer ' + token }},\n",
            "  }});\n",
            "  if (response.status === 401) {{\n",
            "    localStorage.removeItem('{token_key}');\n",
            "    window.location.href = '/admin/login';\n",
            "    throw new Error('unauthorized');\n",
            "  }}\n",
            "  return response.json();\n",
            "}}\n",
            "async function loadStats() {{\n",
            "  const result = await api('/api/admin/stats');\n",
            "  if (!result.success) return;\n",
            "  document.getElementById('stat-total').textContent = result.stats.total_submissions;\n",
            "  document.getElementById('stat-unread').textContent = result.stats.unread_submissions;\n",
            "  document.getElementById('stat-recent').textContent = result.stats.recent_submissions;\n",
            "}}\n",
            "async function loadSubmissions() {{\n",
            "  const unread = document.getElementById('unread-only').checked;\n",
            "  const query = '?page=' + page + (unread ? '&is_read=false' : '');\n",
            "  const result = await api('/api/admin/submissions' + query);\n",
            "  if (!result.success) return;\n",
            "  const body = document.getElementById('submissions');\n",
            "  body.replaceChildren();\n",
            "  for (const item of result.submissions) {{\n",
            "    const row = document.createElement('tr');\n",
            "    if (!item.is_read) row.className = 'font-bold';\n",
            "    for (const value of [item.submitted_at, item.name, item.email, item.service, item.message]) {{\n",
            "      const cell = document.createElement('td');\n",
            "      cell.appendChild(text(value));\n",
            "      row.appendChild(cell);\n",
            "    }}\n",
            "    const actions = document.createElement('td');\n",
            "    const toggle = document.createElement('button');\n",
            "    toggle.textContent = item.is_read ? 'Mark unread' : 'Mark read';\n",
            "    toggle.onclick = async () => {{\n",
            "      await api('/api/admin/submissions/' + item.id + '/mark-read', {{\n",
            "        method: 'PATCH', body: JSON.stringify({{ is_read: !item.is_read }}),\n",
            "      }});\n",
            "      refresh();\n",
            "    }};\n",
            "    const remove = document.createElement('button');\n",
            "    remove.textContent = 'Delete';\n",
            "    remove.onclick = async () => {{\n",
            "      if (!confirm('Delete this submission?')) return;\n",
            "      await api('/api/admin/submissions/' + item.id, {{ method: 'DELETE' }});\n",
            "      refresh();\n",
            "    }};\n",
            "    actions.append(toggle, remove);\n",
            "    row.appendChild(actions);\n",
            "    body.appendChild(row);\n",
            "  }}\n",
            "  const p = result.pagination;\n",
            "  document.getElementById('page-info').textContent = 'Page ' + p.page + ' of ' + Math.max(p.pages, 1);\n",
            "  document.getElementById('prev-page').disabled = !p.has_prev;\n",
            "  document.getElementById('next-page').disabled = !p.has_next;\n",
            "}}\n",
            "function refresh() {{ loadStats(); loadSubmissions(); }}\n",
            "document.getElementById('prev-page').onclick = () => {{ page -= 1; loadSubmissions(); }};\n",
            "document.getElementById('next-page').onclick = () => {{ page += 1; loadSubmissions(); }};\n",
            "document.getElementById('unread-only').onchange = () => {{ page = 1; loadSubmissions(); }};\n",
            "document.getElementById('logout').onclick = () => {{\n",
            "  localStorage.removeItem('{token_key}');\n",
            "  window.location.href = '/admin/login';\n",
            "}};\n",
            "api('/api/admin/profile').then((result) => {{\n",
            "  if (result.success) document.getElementById('admin-name').textContent = result.admin.username;\n",
            "}});\n",
            "refresh();\n",
            "</script>\n</body>\n</html>\n",
        ),
        token_key = TOKEN_KEY,
    )
}
