//! Embedded report-card page
//!
//! A single HTML page served by the node: the entry form plus the rendered
//! chain. All data goes through the JSON-RPC endpoint on the same origin.

/// Page template with embedded CSS and JavaScript
pub const EXPLORER_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>School Report Card Blockchain</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: linear-gradient(135deg, #1a1a2e 0%, #16213e 100%);
            color: #e0e0e0;
            min-height: 100vh;
            padding: 20px;
        }
        .container { max-width: 900px; margin: 0 auto; }
        header {
            text-align: center;
            padding: 40px 0;
            border-bottom: 1px solid #333;
            margin-bottom: 30px;
        }
        h1 {
            font-size: 2.2rem;
            background: linear-gradient(90deg, #00d4ff, #7c3aed);
            -webkit-background-clip: text;
            -webkit-text-fill-color: transparent;
            margin-bottom: 10px;
        }
        .subtitle { color: #888; font-size: 1rem; }
        .entry-form {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 15px;
            margin-bottom: 15px;
        }
        .entry-form input {
            padding: 15px 20px;
            border: 1px solid rgba(255,255,255,0.1);
            border-radius: 8px;
            background: rgba(255,255,255,0.05);
            color: #fff;
            font-size: 1rem;
        }
        .entry-form input::placeholder { color: #666; }
        .actions { display: flex; gap: 10px; margin-bottom: 20px; }
        button {
            padding: 12px 20px;
            border: none;
            border-radius: 8px;
            background: linear-gradient(90deg, #00d4ff, #7c3aed);
            color: #fff;
            font-size: 1rem;
            cursor: pointer;
        }
        button.secondary { background: rgba(255,255,255,0.08); }
        .notice { padding: 12px 16px; border-radius: 8px; margin-bottom: 20px; display: none; }
        .notice.success { display: block; background: rgba(0,200,120,0.15); color: #5fe3a1; }
        .notice.error { display: block; background: rgba(255,80,80,0.15); color: #ff6b6b; }
        .section-title {
            font-size: 1.2rem;
            color: #7c3aed;
            margin: 30px 0 15px;
            border-bottom: 1px solid #333;
            padding-bottom: 10px;
        }
        .block-list { list-style: none; }
        .block-item {
            background: rgba(255,255,255,0.03);
            border: 1px solid rgba(255,255,255,0.08);
            border-radius: 8px;
            padding: 15px;
            margin-bottom: 10px;
        }
        .block-height { font-weight: 700; color: #00d4ff; font-size: 1.1rem; }
        .block-item.flagged { border-color: #ff6b6b; }
        .label { color: #888; font-size: 0.85rem; margin-top: 8px; }
        pre, code {
            font-family: monospace;
            font-size: 0.85rem;
            color: #ccc;
            white-space: pre-wrap;
            word-break: break-all;
        }
        .loading { text-align: center; padding: 40px; color: #888; }
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>School Report Card Blockchain</h1>
            <p class="subtitle">Append-only · Hash-linked · Tamper-evident</p>
        </header>

        <form class="entry-form" id="entryForm">
            <input type="text" id="student" placeholder="Student Name">
            <input type="text" id="subject" placeholder="Subject">
            <input type="text" id="grade" placeholder="Grade">
        </form>
        <div class="actions">
            <button type="submit" form="entryForm">Add Report Card Entry</button>
            <button type="button" class="secondary" id="validateBtn">Validate Chain</button>
        </div>
        <div class="notice" id="notice"></div>

        <h2 class="section-title">Blockchain</h2>
        <ul class="block-list" id="blockList">
            <li class="loading">Loading blocks...</li>
        </ul>
    </div>

    <script>
        const RPC_URL = window.location.origin;

        async function rpc(method, params = []) {
            const res = await fetch(RPC_URL, {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ jsonrpc: '2.0', method, params, id: 1 })
            });
            return res.json();
        }

        function notify(kind, text) {
            const el = document.getElementById('notice');
            el.className = 'notice ' + kind;
            el.textContent = text;
        }

        function field(label, text, tag) {
            const frag = document.createDocumentFragment();
            const l = document.createElement('div');
            l.className = 'label';
            l.textContent = label;
            const v = document.createElement(tag);
            v.textContent = text;
            frag.append(l, v);
            return frag;
        }

        async function loadBlocks(flagged = new Set()) {
            const list = document.getElementById('blockList');
            try {
                const { result } = await rpc('listblocks');
                list.replaceChildren(...result.map((b, position) => {
                    const li = document.createElement('li');
                    li.className = 'block-item' + (flagged.has(position) ? ' flagged' : '');
                    const title = document.createElement('div');
                    title.className = 'block-height';
                    title.textContent = 'Block #' + b.index;
                    li.append(
                        title,
                        field('Timestamp', b.timestamp, 'code'),
                        field('Data', JSON.stringify(b.data, null, 2), 'pre'),
                        field('Previous Hash', b.previous_hash, 'code'),
                        field('Hash', b.hash, 'code'),
                    );
                    return li;
                }));
            } catch (e) {
                list.innerHTML = '<li class="loading">Failed to load blocks</li>';
            }
        }

        document.getElementById('entryForm').addEventListener('submit', async (ev) => {
            ev.preventDefault();
            const entry = {
                student: document.getElementById('student').value,
                subject: document.getElementById('subject').value,
                grade: document.getElementById('grade').value,
            };
            const res = await rpc('addentry', entry);
            if (res.error) {
                notify('error', res.error.message);
            } else {
                notify('success', res.result.message);
                document.getElementById('entryForm').reset();
            }
            loadBlocks();
        });

        document.getElementById('validateBtn').addEventListener('click', async () => {
            const { result } = await rpc('validatechain');
            if (result.valid) {
                notify('success', 'Chain is intact: ' + result.length + ' blocks verified.');
                loadBlocks();
            } else {
                notify('error', result.violations.map(v => '#' + v.position + ': ' + v.message).join('\n'));
                loadBlocks(new Set(result.violations.map(v => v.position)));
            }
        });

        loadBlocks();
    </script>
</body>
</html>
"#;
