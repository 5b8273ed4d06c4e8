use crate::core::form::{FormAction, QueryForm, FORM_HELP};
use crate::core::report::PriceReport;
use crate::domain::ports::Predictor;
use crate::utils::error::{ErrorCategory, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Interactive form loop: edit controls line by line, submit to get a price.
pub struct Session<P: Predictor> {
    predictor: P,
    form: QueryForm,
    currency: String,
}

impl<P: Predictor> Session<P> {
    pub fn new(predictor: P, form: QueryForm, currency: impl Into<String>) -> Self {
        Self {
            predictor,
            form,
            currency: currency.into(),
        }
    }

    pub fn form(&self) -> &QueryForm {
        &self.form
    }

    pub fn into_predictor(self) -> P {
        self.predictor
    }

    async fn submit(&mut self) -> Result<PriceReport> {
        let query = self.form.query()?;
        let price = self.predictor.predict(&query).await?;
        Ok(PriceReport::new(
            price,
            &self.currency,
            self.predictor.label(),
            query,
            self.predictor.note(),
        ))
    }

    /// Runs until `quit` or end of input. Returns the number of estimates shown.
    ///
    /// Bad input for one control is reported and the loop continues; any other
    /// error (load or fit failure) ends the session.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut estimates = 0;

        output
            .write_all(format!("{}\n\n{}\n> ", self.form.render(), FORM_HELP).as_bytes())
            .await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            let outcome = match self.form.apply(&line) {
                Ok(FormAction::Quit) => break,
                Ok(FormAction::Updated) | Ok(FormAction::Show) => Ok(self.form.render()),
                Ok(FormAction::Help) => Ok(FORM_HELP.to_string()),
                Ok(FormAction::Submit) => self.submit().await.map(|report| {
                    estimates += 1;
                    tracing::debug!(price = report.price, "estimate shown");
                    report.render_text()
                }),
                Err(e) => Err(e),
            };
            let reply = match outcome {
                Ok(reply) => reply,
                Err(e) if e.category() == ErrorCategory::Input => {
                    format!("❌ {}", e.user_friendly_message())
                }
                Err(e) => return Err(e),
            };
            output.write_all(format!("{}\n> ", reply).as_bytes()).await?;
            output.flush().await?;
        }

        output.write_all(b"\n").await?;
        output.flush().await?;
        Ok(estimates)
    }
}
