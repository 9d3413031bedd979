use crate::entitlement::{Availability, EVENING_START_HOUR};
use crate::models::DayCheckIn;

pub fn render_index(
    date: &str,
    streak: u32,
    day: Option<&DayCheckIn>,
    availability: Availability,
) -> String {
    let morning_done = day.is_some_and(|day| day.morning);
    let evening_done = day.is_some_and(|day| day.evening);
    INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{STREAK}}", &streak.to_string())
        .replace("{{STREAK_NOTE}}", streak_note(streak))
        .replace("{{MORNING}}", status_label(morning_done))
        .replace("{{EVENING}}", status_label(evening_done))
        .replace("{{MORNING_DISABLED}}", disabled(availability.can_morning))
        .replace("{{EVENING_DISABLED}}", disabled(availability.can_evening))
        .replace("{{EVENING_HOUR}}", &EVENING_START_HOUR.to_string())
}

fn streak_note(streak: u32) -> &'static str {
    match streak {
        0 => "Start your mindfulness journey today",
        1 => "Great start! Keep it going",
        _ => "Consecutive days of presence",
    }
}

fn status_label(done: bool) -> &'static str {
    if done { "Done" } else { "Open" }
}

fn disabled(available: bool) -> &'static str {
    if available { "" } else { "disabled" }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>ZenVibe Check-In</title>
  <style>
    :root {
      --bg-1: #eef4f1;
      --bg-2: #cfe3da;
      --ink: #24302c;
      --accent: #4f8a74;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f6faf8 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Georgia", serif;
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f6b66;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(150px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d8783;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    form {
      display: grid;
      gap: 10px;
    }

    textarea {
      min-height: 80px;
      border-radius: 14px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      padding: 12px;
      font: inherit;
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
      background: #b8c4bf;
      cursor: default;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.9rem;
      color: #5f6b66;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Daily Check-In</h1>
      <p class="subtitle">A gentle moment to center yourself</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Today</span>
        <span class="value">{{DATE}}</span>
      </div>
      <div class="stat">
        <span class="label">Streak</span>
        <span class="value">{{STREAK}}</span>
        <span class="subtitle">{{STREAK_NOTE}}</span>
      </div>
      <div class="stat">
        <span class="label">Morning</span>
        <span class="value">{{MORNING}}</span>
      </div>
      <div class="stat">
        <span class="label">Evening</span>
        <span class="value">{{EVENING}}</span>
      </div>
      <div class="stat">
        <span class="label">14-day rate</span>
        <span id="rate" class="value">-</span>
      </div>
    </section>

    <p id="prompt" class="subtitle"></p>

    <form method="post" action="/checkin/morning">
      <textarea name="reflection" placeholder="Take a moment to reflect..."></textarea>
      <button type="submit" {{MORNING_DISABLED}}>Complete Morning Check-In</button>
    </form>

    <form method="post" action="/checkin/evening">
      <textarea name="reflection" placeholder="Reflect on your day..."></textarea>
      <label><input type="checkbox" name="premium" /> Premium</label>
      <button type="submit" {{EVENING_DISABLED}}>Complete Evening Check-In</button>
      <span class="subtitle">Evening check-ins open at {{EVENING_HOUR}}:00 for premium members.</span>
    </form>

    <div id="status" class="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const params = new URLSearchParams(window.location.search);
    const premium = params.get('premium') === 'true';

    const load = async () => {
      const [today, stats] = await Promise.all([
        fetch(`/api/today?premium=${premium}`).then((res) => res.json()),
        fetch(`/api/stats?premium=${premium}`).then((res) => res.json())
      ]);
      document.getElementById('prompt').textContent = today.prompt;
      document.getElementById('rate').textContent = `${stats.completion_rate_percent}%`;
    };

    load().catch((err) => {
      statusEl.textContent = err.message;
    });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_fills_every_placeholder() {
        let day = DayCheckIn {
            morning: true,
            evening: false,
            reflection: String::new(),
        };
        let html = render_index(
            "2026-01-05",
            3,
            Some(&day),
            Availability {
                can_morning: false,
                can_evening: true,
            },
        );
        assert!(!html.contains("{{"));
        assert!(html.contains("2026-01-05"));
        assert!(html.contains("Consecutive days of presence"));
        assert!(html.contains(r#"<button type="submit" disabled>Complete Morning"#));
        assert!(html.contains(r#"<button type="submit" >Complete Evening"#));
    }
}
