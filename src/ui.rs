use crate::controls::{bounds_for, default_value_for, describe_contribution, format_value};
use crate::models::{ContributionRecord, ContributionType};
use crate::projection::format_currency;
use serde_json::json;

pub fn render_index(record: &ContributionRecord) -> String {
    let bounds = bounds_for(record.contribution_type);
    let is_percent = record.contribution_type == ContributionType::Percent;
    let checked = |on: bool| if on { "checked" } else { "" };

    INDEX_HTML
        .replace("{{CONTROLS}}", &controls_json())
        .replace("{{YTD}}", &format_currency(record.ytd_contributions))
        .replace("{{CURRENT}}", &describe_contribution(record.contribution()))
        .replace("{{PERCENT_CHECKED}}", checked(is_percent))
        .replace("{{DOLLAR_CHECKED}}", checked(!is_percent))
        .replace("{{VALUE}}", &format_value(record.contribution_value))
        .replace("{{MIN}}", &format_value(bounds.min))
        .replace("{{MAX}}", &format_value(bounds.max))
        .replace("{{STEP}}", &format_value(bounds.step))
        .replace("{{UNIT}}", bounds.unit)
}

/// Bounds and reset values per type, embedded so the page never hardcodes them.
fn controls_json() -> String {
    let entry = |ty: ContributionType| {
        json!({ "bounds": bounds_for(ty), "default": default_value_for(ty) })
    };
    json!({
        "percent": entry(ContributionType::Percent),
        "dollar": entry(ContributionType::Dollar),
    })
    .to_string()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Retirement Contribution</title>
  <style>
    :root {
      --ink: #1f2a33;
      --muted: #6b7680;
      --accent: #2f6f5e;
      --card: #ffffff;
      --shadow: 0 20px 50px rgba(31, 42, 51, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, #eef4f1, #f7f3ea);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px;
    }

    .app {
      width: min(560px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 22px;
    }

    h1 {
      margin: 0;
      font-size: 1.8rem;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .stat .value {
      display: block;
      font-size: 1.6rem;
      font-weight: 600;
    }

    .types {
      display: flex;
      gap: 18px;
    }

    .rate {
      display: grid;
      grid-template-columns: 1fr 110px auto;
      gap: 12px;
      align-items: center;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      background: var(--accent);
      color: white;
      cursor: pointer;
    }

    button:disabled {
      opacity: 0.6;
      cursor: progress;
    }

    .status {
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Retirement Contribution</h1>

    <section class="stat">
      <span class="label">Year-to-date contributions</span>
      <span id="ytd-contributions" class="value">{{YTD}}</span>
    </section>

    <section class="stat">
      <span class="label">Current setting</span>
      <span id="current-contribution" class="value">{{CURRENT}}</span>
    </section>

    <section class="types">
      <label><input type="radio" name="type" id="type-percent" value="percent" {{PERCENT_CHECKED}} /> % of salary</label>
      <label><input type="radio" name="type" id="type-dollar" value="dollar" {{DOLLAR_CHECKED}} /> $ per paycheck</label>
    </section>

    <section class="rate">
      <input type="range" id="contribution-slider" min="{{MIN}}" max="{{MAX}}" step="{{STEP}}" value="{{VALUE}}" />
      <input type="number" id="contribution-input" min="{{MIN}}" max="{{MAX}}" step="{{STEP}}" value="{{VALUE}}" />
      <span id="contribution-unit">{{UNIT}}</span>
    </section>

    <section class="stat">
      <span class="label">Added at age 65</span>
      <span id="future-impact-amount" class="value">$0</span>
    </section>

    <button id="save-button" type="button">Save Changes</button>
    <div class="status" id="save-status"></div>
  </main>

  <script>
    const controls = {{CONTROLS}};
    const ytdEl = document.getElementById('ytd-contributions');
    const currentEl = document.getElementById('current-contribution');
    const percentEl = document.getElementById('type-percent');
    const dollarEl = document.getElementById('type-dollar');
    const sliderEl = document.getElementById('contribution-slider');
    const inputEl = document.getElementById('contribution-input');
    const unitEl = document.getElementById('contribution-unit');
    const impactEl = document.getElementById('future-impact-amount');
    const saveButton = document.getElementById('save-button');
    const statusEl = document.getElementById('save-status');

    let record = null;
    let clearTimer = null;
    let impactSeq = 0;

    const selectedType = () => (percentEl.checked ? 'percent' : 'dollar');

    const setStatus = (message, type, ttl) => {
      clearTimeout(clearTimer);
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      if (ttl) {
        clearTimer = setTimeout(() => setStatus('', ''), ttl);
      }
    };

    const applyBounds = (type) => {
      const { min, max, step, unit } = controls[type].bounds;
      for (const el of [sliderEl, inputEl]) {
        el.min = min;
        el.max = max;
        el.step = step;
      }
      unitEl.textContent = unit;
    };

    const setValue = (value) => {
      sliderEl.value = value;
      inputEl.value = value;
    };

    const refreshImpact = async () => {
      const seq = ++impactSeq;
      const params = new URLSearchParams({
        contribution_type: selectedType(),
        contribution_value: inputEl.value,
      });
      const res = await fetch(`/api/projection?${params}`);
      const formatted = res.ok ? (await res.json()).formatted : '$0';
      // Replies can land out of order while the slider is dragged.
      if (seq === impactSeq) {
        impactEl.textContent = formatted;
      }
    };

    const money = new Intl.NumberFormat('en-US', {
      style: 'currency',
      currency: 'USD',
      maximumFractionDigits: 0,
    });

    const render = (data) => {
      record = data;
      ytdEl.textContent = money.format(data.ytd_contributions);
      currentEl.textContent = data.contribution_type === 'percent'
        ? `${data.contribution_value}%`
        : `${money.format(data.contribution_value)} per paycheck`;
      percentEl.checked = data.contribution_type === 'percent';
      dollarEl.checked = !percentEl.checked;
      applyBounds(data.contribution_type);
      setValue(data.contribution_value);
      refreshImpact().catch(() => {});
    };

    const load = async () => {
      const res = await fetch('/api/contribution');
      if (!res.ok) {
        throw new Error('Error loading data.');
      }
      render(await res.json());
    };

    const save = async () => {
      saveButton.disabled = true;
      saveButton.textContent = 'Saving...';
      try {
        const res = await fetch('/api/contribution', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({
            ...record,
            contribution_type: selectedType(),
            contribution_value: Number(inputEl.value),
          }),
        });
        if (!res.ok) {
          throw new Error('Error saving data.');
        }
        render((await res.json()).data);
        setStatus('Changes saved successfully!', 'ok', 3000);
      } catch (err) {
        setStatus('Error saving data.', 'error');
      } finally {
        saveButton.disabled = false;
        saveButton.textContent = 'Save Changes';
      }
    };

    const onTypeChange = () => {
      const type = selectedType();
      applyBounds(type);
      setValue(controls[type].default);
      refreshImpact().catch(() => {});
    };

    const onValueChange = (event) => {
      setValue(event.target.value);
      refreshImpact().catch(() => {});
    };

    percentEl.addEventListener('change', onTypeChange);
    dollarEl.addEventListener('change', onTypeChange);
    sliderEl.addEventListener('input', onValueChange);
    inputEl.addEventListener('input', onValueChange);
    saveButton.addEventListener('click', save);

    load().catch(() => setStatus('Error loading data.', 'error'));
  </script>
</body>
</html>
"#;
