//! Browser-side wiring for the rendered page.
//!
//! Mirrors the view-model in the browser: reveal observers, menu outside
//! clicks, theme toggle and the contact form fetch. Numeric constants and
//! messages are substituted from the Rust side so both stay in step.

use std::sync::OnceLock;

use crate::{
    form::{
        GENERIC_FAILURE_MESSAGE, NETWORK_ERROR_MESSAGE, RESET_DELAY, SUBMITTING_LABEL,
        SUBMIT_LABEL,
    },
    menu::{MENU_BUTTON_ID, MENU_PANEL_ID},
    reveal::VISIBILITY_THRESHOLD,
    theme::DARK_CLASS,
};

const TEMPLATE: &str = r#"(() => {
  const THRESHOLD = __THRESHOLD__;
  const RESET_DELAY_MS = __RESET_DELAY_MS__;
  const GENERIC_FAILURE = __GENERIC_FAILURE__;
  const NETWORK_ERROR = __NETWORK_ERROR__;
  const SUBMIT_LABEL = __SUBMIT_LABEL__;
  const SUBMITTING_LABEL = __SUBMITTING_LABEL__;

  document.querySelectorAll("[data-reveal]").forEach((el) => {
    if (el.dataset.visible === "true") return;
    const observer = new IntersectionObserver((entries) => {
      if (!entries.some((entry) => entry.intersectionRatio >= THRESHOLD)) return;
      el.dataset.visible = "true";
      el.querySelectorAll("[data-segment]").forEach((span) => {
        span.style.filter = "blur(0px)";
        span.style.opacity = "1";
        span.style.transform = "translateY(0px)";
      });
      observer.disconnect();
    }, { threshold: THRESHOLD });
    observer.observe(el);
  });

  const button = document.getElementById(__MENU_BUTTON__);
  const panel = document.getElementById(__MENU_PANEL__);
  let outside = null;
  const closeMenu = () => {
    panel.hidden = true;
    button.setAttribute("aria-label", "Open menu");
    if (outside) {
      document.removeEventListener("mousedown", outside);
      outside = null;
    }
  };
  const openMenu = () => {
    panel.hidden = false;
    button.setAttribute("aria-label", "Close menu");
    outside = (event) => {
      if (!panel.contains(event.target) && !button.contains(event.target)) closeMenu();
    };
    document.addEventListener("mousedown", outside);
  };
  if (button && panel) {
    button.addEventListener("click", () => (panel.hidden ? openMenu() : closeMenu()));
    panel.querySelectorAll("[data-menu-entry]").forEach((a) => a.addEventListener("click", closeMenu));
  }

  const toggle = document.getElementById("theme-toggle");
  if (toggle) {
    toggle.addEventListener("click", () => {
      const dark = document.documentElement.classList.toggle(__DARK_CLASS__);
      toggle.setAttribute("aria-pressed", String(dark));
    });
  }

  document.querySelectorAll("img[data-fallback-image]").forEach((img) => {
    img.addEventListener("error", () => {
      img.style.display = "none";
      if (img.nextElementSibling) img.nextElementSibling.style.display = "flex";
    });
  });

  const form = document.getElementById("contact-form");
  if (!form) return;
  const submit = document.getElementById("contact-submit");
  const label = document.getElementById("contact-submit-label");
  const success = document.getElementById("form-status-success");
  const failure = document.getElementById("form-status-error");
  const failureText = document.getElementById("form-error-message");
  let generation = 0;
  let resetTimer = null;

  const show = (status, message) => {
    form.dataset.status = status;
    success.hidden = status !== "success";
    failure.hidden = status !== "error";
    failureText.textContent = message || "";
    submit.disabled = status === "loading";
    label.textContent = status === "loading" ? SUBMITTING_LABEL : SUBMIT_LABEL;
  };

  form.addEventListener("submit", async (event) => {
    event.preventDefault();
    if (form.dataset.status === "loading") return;
    if (resetTimer) clearTimeout(resetTimer);
    const current = ++generation;
    show("loading", "");
    const data = new FormData(form);
    const body = JSON.stringify({
      name: data.get("name"),
      email: data.get("email"),
      service: data.get("service"),
      message: data.get("message"),
    });
    try {
      const response = await fetch(form.dataset.endpoint, {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body,
      });
      const result = await response.json();
      if (current !== generation) return;
      if (result.success) {
        form.reset();
        show("success", "");
        resetTimer = setTimeout(() => {
          if (current === generation) show("idle", "");
        }, RESET_DELAY_MS);
      } else {
        show("error", result.error || GENERIC_FAILURE);
      }
    } catch (error) {
      if (current === generation) show("error", NETWORK_ERROR);
    }
  });
})();
"#;

/// The page script with the shared constants filled in.
pub fn browser_script() -> &'static str {
    static SCRIPT: OnceLock<String> = OnceLock::new();
    SCRIPT.get_or_init(|| {
        TEMPLATE
            .replace("__THRESHOLD__", &VISIBILITY_THRESHOLD.to_string())
            .replace("__RESET_DELAY_MS__", &RESET_DELAY.as_millis().to_string())
            .replace("__GENERIC_FAILURE__", &js_string(GENERIC_FAILURE_MESSAGE))
            .replace("__NETWORK_ERROR__", &js_string(NETWORK_ERROR_MESSAGE))
            .replace("__SUBMIT_LABEL__", &js_string(SUBMIT_LABEL))
            .replace("__SUBMITTING_LABEL__", &js_string(SUBMITTING_LABEL))
            .replace("__MENU_BUTTON__", &js_string(MENU_BUTTON_ID))
            .replace("__MENU_PANEL__", &js_string(MENU_PANEL_ID))
            .replace("__DARK_CLASS__", &js_string(DARK_CLASS))
    })
}

/// JSON string literals are valid JS string literals; `</` is broken up so
/// the value cannot close the surrounding script element.
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string())
        .to_string()
        .replace("</", "<\\/")
}
