pub fn page() -> &'static str {
    INDEX_HTML
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Conference Schedule Board</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef3f8;
      --bg-2: #cfe0ef;
      --ink: #22303c;
      --accent: #2f6fed;
      --accent-2: #1d3c5a;
      --mark: #f0b429;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(29, 60, 90, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e3ecf5 60%, #f2f6fa 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
      display: grid;
      justify-items: center;
    }

    .app {
      width: min(1100px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: flex-end;
      justify-content: space-between;
      gap: 12px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.5rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5b6b7a;
      font-size: 1rem;
    }

    .identity {
      display: flex;
      align-items: center;
      gap: 10px;
    }

    .identity label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #73828f;
    }

    select, input[type="text"], input[type="password"] {
      font: inherit;
      padding: 8px 12px;
      border-radius: 12px;
      border: 1px solid rgba(29, 60, 90, 0.25);
      background: white;
      color: var(--ink);
    }

    .filters {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .filters button {
      appearance: none;
      border: 1px solid rgba(47, 111, 237, 0.4);
      background: white;
      color: var(--accent);
      border-radius: 999px;
      padding: 6px 14px;
      font: inherit;
      font-size: 0.9rem;
      cursor: pointer;
    }

    .filters button.active {
      background: var(--accent);
      color: white;
    }

    .table-wrap {
      overflow-x: auto;
    }

    table {
      border-collapse: collapse;
      width: 100%;
    }

    th, td {
      border: 1px solid rgba(29, 60, 90, 0.14);
      padding: 10px;
      vertical-align: top;
      text-align: left;
    }

    th {
      background: var(--accent-2);
      color: white;
      font-weight: 500;
      font-size: 0.85rem;
    }

    td.time-column {
      background: rgba(29, 60, 90, 0.06);
      font-weight: 600;
      white-space: nowrap;
      width: 80px;
    }

    td.session-cell {
      cursor: pointer;
      transition: background 120ms ease;
    }

    td.session-cell:hover {
      background: rgba(47, 111, 237, 0.08);
    }

    td.session-cell.common {
      cursor: default;
      background: rgba(29, 60, 90, 0.05);
      text-align: center;
      font-weight: 500;
    }

    td.session-cell.mine {
      background: rgba(240, 180, 41, 0.22);
    }

    td.empty-cell {
      background: rgba(29, 60, 90, 0.02);
    }

    .session-title {
      font-weight: 600;
      margin-bottom: 4px;
    }

    .session-meta {
      font-size: 0.82rem;
      color: #5b6b7a;
    }

    .badge {
      display: inline-block;
      background: #c63b2b;
      color: white;
      border-radius: 999px;
      font-size: 0.7rem;
      padding: 2px 8px;
      margin-left: 6px;
      vertical-align: middle;
    }

    .attendee-tags {
      margin-top: 6px;
      display: flex;
      flex-wrap: wrap;
      gap: 4px;
    }

    .attendee-tag {
      background: rgba(47, 111, 237, 0.12);
      color: var(--accent-2);
      border-radius: 999px;
      font-size: 0.75rem;
      padding: 2px 8px;
    }

    .settings {
      border: 1px solid rgba(29, 60, 90, 0.12);
      border-radius: 18px;
      padding: 18px;
      display: grid;
      gap: 12px;
    }

    .settings summary {
      cursor: pointer;
      font-weight: 600;
    }

    .settings .row {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
    }

    .settings .row label {
      min-width: 130px;
      font-size: 0.9rem;
      color: #5b6b7a;
    }

    .settings input {
      flex: 1;
      min-width: 220px;
    }

    .settings .hint {
      margin: 0;
      font-size: 0.85rem;
      color: #73828f;
    }

    button.action {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.action.secondary {
      background: rgba(29, 60, 90, 0.1);
      color: var(--accent-2);
    }

    button.action:disabled {
      opacity: 0.45;
      cursor: not-allowed;
    }

    .status {
      font-size: 0.95rem;
      color: #5b6b7a;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }

    .overlay {
      position: fixed;
      inset: 0;
      background: rgba(29, 60, 90, 0.4);
      display: grid;
      place-items: center;
      padding: 18px;
    }

    .overlay[hidden] {
      display: none;
    }

    .dialog {
      width: min(480px, 100%);
      background: white;
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 24px;
      display: grid;
      gap: 12px;
    }

    .dialog h2 {
      margin: 0;
      font-size: 1.3rem;
    }

    .dialog .buttons {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      justify-content: flex-end;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <div>
        <h1>Conference Schedule Board</h1>
        <p class="subtitle">Pick your name, then click a session to mark yourself attending.</p>
      </div>
      <div class="identity">
        <label for="user-picker">I am</label>
        <select id="user-picker"></select>
      </div>
    </header>

    <div class="filters" id="member-filters"></div>

    <div class="table-wrap">
      <table id="schedule">
        <thead></thead>
        <tbody></tbody>
      </table>
    </div>

    <details class="settings">
      <summary>Spreadsheet sync</summary>
      <div class="row">
        <label for="api-key">API key</label>
        <input type="password" id="api-key" autocomplete="off" />
      </div>
      <div class="row">
        <label for="write-url">Write endpoint</label>
        <input type="text" id="write-url" placeholder="https://..." />
      </div>
      <div class="row">
        <button class="action" id="save-settings" type="button">Save</button>
        <button class="action secondary" id="clear-settings" type="button">Clear</button>
        <span id="settings-state" class="status"></span>
      </div>
      <p class="hint">The API key reads the member sheet. Writes go through a separate endpoint; without one, choices are kept on this server only.</p>
    </details>

    <div class="status" id="status"></div>
  </main>

  <div class="overlay" id="overlay" hidden>
    <div class="dialog" role="dialog" aria-modal="true">
      <h2 id="dialog-title"></h2>
      <div class="session-meta" id="dialog-meta"></div>
      <div id="dialog-attendees"></div>
      <div class="status" id="dialog-status"></div>
      <div class="buttons">
        <button class="action secondary" id="dialog-close" type="button">Close</button>
        <button class="action secondary" id="dialog-drop" type="button">Remove me</button>
        <button class="action" id="dialog-enroll" type="button">I'm attending</button>
      </div>
    </div>
  </div>

  <script>
    const statusEl = document.getElementById('status');
    const tableEl = document.getElementById('schedule');
    const filtersEl = document.getElementById('member-filters');
    const userPickerEl = document.getElementById('user-picker');
    const overlayEl = document.getElementById('overlay');
    const dialogTitleEl = document.getElementById('dialog-title');
    const dialogMetaEl = document.getElementById('dialog-meta');
    const dialogAttendeesEl = document.getElementById('dialog-attendees');
    const dialogStatusEl = document.getElementById('dialog-status');
    const dialogEnrollBtn = document.getElementById('dialog-enroll');
    const dialogDropBtn = document.getElementById('dialog-drop');
    const apiKeyEl = document.getElementById('api-key');
    const writeUrlEl = document.getElementById('write-url');
    const settingsStateEl = document.getElementById('settings-state');

    let members = [];
    let currentUser = null;
    let memberFilter = null;
    let openSession = null;

    const esc = (value) => {
      const div = document.createElement('div');
      div.textContent = value == null ? '' : String(value);
      return div.innerHTML;
    };

    const setStatus = (el, message, type) => {
      el.textContent = message;
      el.dataset.type = type || '';
    };

    const api = async (path, options) => {
      const res = await fetch(path, options);
      if (!res.ok) {
        throw new Error((await res.text()) || 'request failed');
      }
      return res.json();
    };

    const post = (path, body) => api(path, {
      method: 'POST',
      headers: { 'content-type': 'application/json' },
      body: JSON.stringify(body)
    });

    const renderTable = (grid) => {
      const thead = tableEl.querySelector('thead');
      const headerCells = ['<th>Time</th>'].concat(grid.rooms.map(
        (room) => `<th>${esc(room.code)}<br>${esc(room.floor)}<br>${esc(room.name)}</th>`
      ));
      thead.innerHTML = `<tr>${headerCells.join('')}</tr>`;

      const tbody = tableEl.querySelector('tbody');
      tbody.innerHTML = '';
      grid.rows.forEach((row) => {
        const tr = document.createElement('tr');
        tr.innerHTML = `<td class="time-column">${esc(row.time)}</td>`;
        row.cells.forEach((cell) => {
          const td = document.createElement('td');
          if (cell.kind === 'session') {
            td.className = 'session-cell';
            td.dataset.code = cell.code;
            if (cell.colspan > 1) {
              td.setAttribute('colspan', cell.colspan);
            }
            if (cell.common) {
              td.classList.add('common');
              td.innerHTML = `<div class="session-title">${esc(cell.name)}</div>`;
            } else {
              if (cell.highlighted) {
                td.classList.add('mine');
              }
              const badge = cell.no_replay ? '<span class="badge">no replay</span>' : '';
              const tags = cell.attendees.map((name) => `<span class="attendee-tag">${esc(name)}</span>`).join('');
              td.innerHTML = `
                <div class="session-title">${esc(cell.name)}${badge}</div>
                <div class="session-meta">${esc(cell.code)} · ${esc(cell.speaker)}</div>
                <div class="attendee-tags">${tags}</div>
              `;
            }
          } else {
            td.className = 'empty-cell';
          }
          tr.appendChild(td);
        });
        tbody.appendChild(tr);
      });
    };

    const renderFilters = () => {
      filtersEl.innerHTML = '';
      const all = document.createElement('button');
      all.type = 'button';
      all.textContent = 'All';
      all.className = memberFilter === null ? 'active' : '';
      all.addEventListener('click', () => setFilter(null));
      filtersEl.appendChild(all);

      members.forEach((member) => {
        const btn = document.createElement('button');
        btn.type = 'button';
        btn.textContent = member.name;
        btn.className = memberFilter === member.name ? 'active' : '';
        btn.addEventListener('click', () => setFilter(member.name));
        filtersEl.appendChild(btn);
      });
    };

    const renderUserPicker = () => {
      userPickerEl.innerHTML = '';
      const none = document.createElement('option');
      none.value = '';
      none.textContent = '(nobody)';
      userPickerEl.appendChild(none);
      members.forEach((member) => {
        const option = document.createElement('option');
        option.value = member.name;
        option.textContent = member.name;
        userPickerEl.appendChild(option);
      });
      userPickerEl.value = currentUser || '';
    };

    const loadGrid = async () => {
      const query = memberFilter ? `?member=${encodeURIComponent(memberFilter)}` : '';
      renderTable(await api(`/api/grid${query}`));
    };

    const loadBoard = async () => {
      const [grid, roster, user, settings] = await Promise.all([
        api(memberFilter ? `/api/grid?member=${encodeURIComponent(memberFilter)}` : '/api/grid'),
        api('/api/members'),
        api('/api/user'),
        api('/api/settings')
      ]);
      members = roster.members;
      currentUser = user.name;
      renderTable(grid);
      renderFilters();
      renderUserPicker();
      renderSettingsState(settings);
    };

    const setFilter = (name) => {
      memberFilter = name;
      renderFilters();
      loadGrid().catch((err) => setStatus(statusEl, err.message, 'error'));
    };

    const renderSettingsState = (settings) => {
      const parts = [];
      parts.push(settings.sheets_configured ? 'sheet read: on' : 'sheet read: off');
      parts.push(settings.write_configured ? 'writes: remote' : 'writes: local');
      parts.push(`roster: ${settings.roster_source}`);
      setStatus(settingsStateEl, parts.join(' · '), '');
    };

    const openDialog = async (code) => {
      const detail = await api(`/api/sessions/${encodeURIComponent(code)}`);
      openSession = detail.code;
      dialogTitleEl.innerHTML = esc(detail.name) + (detail.no_replay ? '<span class="badge">no replay</span>' : '');
      dialogMetaEl.innerHTML = `${esc(detail.code)} · ${esc(detail.speaker)} · ${esc(detail.time)} · room ${esc(detail.room)}`;
      dialogAttendeesEl.innerHTML = detail.attendees.length
        ? `<div class="attendee-tags">${detail.attendees.map((name) => `<span class="attendee-tag">${esc(name)}</span>`).join('')}</div>`
        : '<span class="session-meta">Nobody has marked this session yet.</span>';
      const enrolled = currentUser && detail.attendees.includes(currentUser);
      dialogEnrollBtn.disabled = !currentUser || enrolled;
      dialogDropBtn.disabled = !currentUser || !enrolled;
      setStatus(dialogStatusEl, currentUser ? '' : 'Pick your name first to mark attendance.', '');
      overlayEl.hidden = false;
    };

    const closeDialog = () => {
      overlayEl.hidden = true;
      openSession = null;
    };

    const mutateEnrollment = async (path) => {
      if (!openSession) {
        return;
      }
      try {
        await post(path, { code: openSession });
        await loadBoard();
        await openDialog(openSession);
      } catch (err) {
        setStatus(dialogStatusEl, err.message, 'error');
      }
    };

    tableEl.addEventListener('click', (event) => {
      const cell = event.target.closest('td.session-cell');
      if (!cell || cell.classList.contains('common')) {
        return;
      }
      openDialog(cell.dataset.code).catch((err) => setStatus(statusEl, err.message, 'error'));
    });

    document.getElementById('dialog-close').addEventListener('click', closeDialog);
    overlayEl.addEventListener('click', (event) => {
      if (event.target === overlayEl) {
        closeDialog();
      }
    });
    dialogEnrollBtn.addEventListener('click', () => mutateEnrollment('/api/enroll'));
    dialogDropBtn.addEventListener('click', () => mutateEnrollment('/api/drop'));

    userPickerEl.addEventListener('change', async () => {
      const name = userPickerEl.value;
      try {
        if (name) {
          await post('/api/user', { name });
        } else {
          await api('/api/user', { method: 'DELETE' });
        }
        await loadBoard();
        setStatus(statusEl, name ? `Acting as ${name}` : 'Nobody selected', 'ok');
      } catch (err) {
        setStatus(statusEl, err.message, 'error');
      }
    });

    document.getElementById('save-settings').addEventListener('click', async () => {
      const body = {};
      if (apiKeyEl.value.trim()) {
        body.api_key = apiKeyEl.value.trim();
      }
      if (writeUrlEl.value.trim()) {
        body.write_url = writeUrlEl.value.trim();
      }
      try {
        renderSettingsState(await post('/api/settings', body));
        apiKeyEl.value = '';
        await loadBoard();
        setStatus(statusEl, 'Settings saved', 'ok');
      } catch (err) {
        setStatus(statusEl, err.message, 'error');
      }
    });

    document.getElementById('clear-settings').addEventListener('click', async () => {
      try {
        renderSettingsState(await api('/api/settings', { method: 'DELETE' }));
        await loadBoard();
        setStatus(statusEl, 'Settings cleared', 'ok');
      } catch (err) {
        setStatus(statusEl, err.message, 'error');
      }
    });

    loadBoard().catch((err) => setStatus(statusEl, `Failed to load schedule data: ${err.message}`, 'error'));
  </script>
</body>
</html>
"#;
